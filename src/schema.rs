use serde::{Deserialize, Serialize};

/// Column names of the collected table, in output order.
pub const HEADER: [&str; 6] = [
    "data structure",
    "data type",
    "workload",
    "number of elements",
    "str number of elements",
    "mean time per operation ns",
];

/// One collected benchmark result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    #[serde(rename = "data structure")]
    pub structure: String,
    #[serde(rename = "data type")]
    pub category: String,
    #[serde(rename = "workload")]
    pub operation: String,
    #[serde(rename = "number of elements")]
    pub elements: u64,
    #[serde(rename = "str number of elements")]
    pub elements_label: String,
    /// Empty when the report was missing or unparsable.
    #[serde(rename = "mean time per operation ns")]
    pub mean_ns: Option<f64>,
}

impl OutputRow {
    /// Fields in [`HEADER`] order. Times print in shortest form (`1200`, `123.45`).
    pub fn to_record(&self) -> [String; 6] {
        [
            self.structure.clone(),
            self.category.clone(),
            self.operation.clone(),
            self.elements.to_string(),
            self.elements_label.clone(),
            self.mean_ns.map(|ns| ns.to_string()).unwrap_or_default(),
        ]
    }
}
