use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// One applicant as delivered by the endpoint.
///
/// Every field is stored as the text it renders to, whatever JSON type the
/// endpoint used for it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "Name", default = "undefined", deserialize_with = "as_text")]
    pub name: String,
    #[serde(rename = "GPA", default = "undefined", deserialize_with = "as_text")]
    pub gpa: String,
    #[serde(rename = "GRE_V", default = "undefined", deserialize_with = "as_text")]
    pub gre_v: String,
    #[serde(rename = "GRE_Q", default = "undefined", deserialize_with = "as_text")]
    pub gre_q: String,
    #[serde(rename = "Essay", default = "undefined", deserialize_with = "as_text")]
    pub essay: String,
    #[serde(rename = "Recom", default = "undefined", deserialize_with = "as_text")]
    pub recom: String,
}

impl Record {
    /// Fields in column order: Name, GPA, GRE_V, GRE_Q, Essay, Recom.
    pub fn fields(&self) -> [&str; 6] {
        [
            self.name.as_str(),
            self.gpa.as_str(),
            self.gre_v.as_str(),
            self.gre_q.as_str(),
            self.essay.as_str(),
            self.recom.as_str(),
        ]
    }

    /// Parse a JSON array of records, keeping the payload order.
    pub fn parse_list(payload: &str) -> Result<Vec<Record>, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

fn undefined() -> String {
    "undefined".to_string()
}

fn as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(&value))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        other => other.to_string(),
    }
}

// Integral floats print without a fraction: `4.0` -> `4`, `1e2` -> `100`.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}
