//! Document configuration

/// Document behaviour options
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// Form nodes fall back to their template node for unset attributes
    pub inherit_from_template: bool,

    /// Create missing data nodes when binding new instances
    pub create_data_on_bind: bool,

    /// Validate instance counts against the occur node
    pub enforce_occurrence: bool,

    /// Node slots reserved up front
    pub initial_capacity: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            inherit_from_template: true,
            create_data_on_bind: true,
            enforce_occurrence: true,
            initial_capacity: 64,
        }
    }
}
