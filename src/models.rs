use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of the source table (one location in one year).
///
/// Numeric measurements are optional: a blank, unparseable or non-finite cell is kept as
/// `None` so the row still takes part in filtering but never reaches a scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub location: String,
    #[serde(rename = "time")]
    pub year: i32,
    #[serde(deserialize_with = "de_lenient_f64", default)]
    pub pop_mlns: Option<f64>,
    #[serde(deserialize_with = "de_lenient_f64", default)]
    pub fertility_rate: Option<f64>,
    #[serde(deserialize_with = "de_lenient_f64", default)]
    pub life_expectancy: Option<f64>,
}

impl Record {
    pub fn new(
        location: impl Into<String>,
        year: i32,
        pop_mlns: Option<f64>,
        fertility_rate: Option<f64>,
        life_expectancy: Option<f64>,
    ) -> Self {
        Self {
            location: location.into(),
            year,
            pop_mlns,
            fertility_rate,
            life_expectancy,
        }
    }
}

/// Serde helper: read an `f64` from a number or a string, mapping blanks, garbage and
/// non-finite values to `None` instead of failing the whole row.
fn de_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct LenientF64;

    impl<'de> Visitor<'de> for LenientF64 {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a number, a numeric string, or an empty cell")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.is_finite().then_some(v))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(s.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        }

        fn visit_bool<E>(self, _v: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(LenientF64)
}

/// The full table, loaded once and only ever read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A numeric column that can be put on an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Year,
    Population,
    FertilityRate,
    LifeExpectancy,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Year,
        Field::Population,
        Field::FertilityRate,
        Field::LifeExpectancy,
    ];

    /// Column name in the input table.
    pub fn column(self) -> &'static str {
        match self {
            Field::Year => "time",
            Field::Population => "pop_mlns",
            Field::FertilityRate => "fertility_rate",
            Field::LifeExpectancy => "life_expectancy",
        }
    }

    /// Human readable axis name.
    pub fn label(self) -> &'static str {
        match self {
            Field::Year => "Year",
            Field::Population => "Population in millions",
            Field::FertilityRate => "Fertility Rate",
            Field::LifeExpectancy => "Life Expectancy (years)",
        }
    }

    pub fn value(self, record: &Record) -> Option<f64> {
        match self {
            Field::Year => Some(record.year as f64),
            Field::Population => record.pop_mlns,
            Field::FertilityRate => record.fertility_rate,
            Field::LifeExpectancy => record.life_expectancy,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Field::ALL
            .into_iter()
            .find(|f| f.column() == wanted || format!("{:?}", f).to_ascii_lowercase() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown field `{s}`, expected one of: time, pop_mlns, fertility_rate, life_expectancy"
                )
            })
    }
}

/// Required columns of the input table, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "location",
    "time",
    "pop_mlns",
    "fertility_rate",
    "life_expectancy",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_parses_column_and_variant_names() {
        assert_eq!("pop_mlns".parse::<Field>().unwrap(), Field::Population);
        assert_eq!("FertilityRate".parse::<Field>().unwrap(), Field::FertilityRate);
        assert_eq!(" time ".parse::<Field>().unwrap(), Field::Year);
        assert!("gdp".parse::<Field>().is_err());
    }

    #[test]
    fn lenient_numbers_from_json() {
        let r: Record = serde_json::from_str(
            r#"{"location":"AUS","time":1960,"pop_mlns":"10.3","fertility_rate":null,"life_expectancy":"n/a"}"#,
        )
        .unwrap();
        assert_eq!(r.pop_mlns, Some(10.3));
        assert_eq!(r.fertility_rate, None);
        assert_eq!(r.life_expectancy, None);
    }
}
