//! Load-time validation report.
//!
//! Persisted collections may have been written by an older build, so the
//! session store checks every one on open. This report records what was
//! read, what was thrown away, and what had to be repaired.

pub struct ValidationReport {
    collections_loaded: Vec<(&'static str, usize)>,
    collections_missing: Vec<&'static str>,
    collections_discarded: Vec<&'static str>,
    repairs: Vec<(&'static str, String)>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            collections_loaded: Vec::new(),
            collections_missing: Vec::new(),
            collections_discarded: Vec::new(),
            repairs: Vec::new(),
        }
    }

    pub fn add_loaded(&mut self, key: &'static str, count: usize) {
        self.collections_loaded.push((key, count));
    }

    pub fn add_missing(&mut self, key: &'static str) {
        self.collections_missing.push(key);
    }

    /// A stored payload that did not match the expected shape.
    pub fn add_discarded(&mut self, key: &'static str) {
        self.collections_discarded.push(key);
    }

    pub fn add_repair(&mut self, key: &'static str, what: impl Into<String>) {
        self.repairs.push((key, what.into()));
    }

    pub fn discarded(&self) -> &[&'static str] {
        &self.collections_discarded
    }

    pub fn repairs(&self) -> &[(&'static str, String)] {
        &self.repairs
    }

    /// Keys that need rewriting after open.
    pub fn dirty_keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = self.collections_discarded.clone();
        for (key, _) in &self.repairs {
            if !keys.contains(key) {
                keys.push(key);
            }
        }
        keys
    }

    pub fn is_clean(&self) -> bool {
        self.collections_discarded.is_empty() && self.repairs.is_empty()
    }

    pub fn format(&self, detailed: bool) -> String {
        let mut output = String::new();

        output.push_str("\nSession Validation Report\n");
        output.push_str("----------------------------------------\n\n");

        output.push_str("Loaded:\n");
        for (key, count) in &self.collections_loaded {
            output.push_str(&format!("  • {}: {} items\n", key, count));
        }
        output.push('\n');

        if detailed && !self.collections_missing.is_empty() {
            output.push_str("Not yet written:\n");
            for key in &self.collections_missing {
                output.push_str(&format!("  • {}\n", key));
            }
            output.push('\n');
        }

        if !self.collections_discarded.is_empty() {
            output.push_str("Discarded (malformed):\n");
            for key in &self.collections_discarded {
                output.push_str(&format!("  • {}\n", key));
            }
            output.push('\n');
        }

        if !self.repairs.is_empty() {
            output.push_str("Repaired:\n");
            for (key, what) in &self.repairs {
                if detailed {
                    output.push_str(&format!("  • {}: {}\n", key, what));
                } else {
                    output.push_str(&format!("  • {}\n", key));
                }
            }
            output.push('\n');
        }

        output.push_str("----------------------------------------\n");
        output.push_str(&format!(
            "\nSummary: {} collections loaded, {} discarded, {} repairs\n\n",
            self.collections_loaded.len(),
            self.collections_discarded.len(),
            self.repairs.len()
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_report() {
        let mut report = ValidationReport::new();
        report.add_loaded("browser.tabs", 3);
        report.add_missing("browser.history");
        assert!(report.is_clean());
        assert!(report.dirty_keys().is_empty());

        let text = report.format(true);
        assert!(text.contains("browser.tabs: 3 items"));
        assert!(text.contains("browser.history"));
    }

    #[test]
    fn test_dirty_keys_are_unique() {
        let mut report = ValidationReport::new();
        report.add_discarded("browser.tabs");
        report.add_repair("browser.tabs", "dropped duplicate id");
        report.add_repair("browser.tabGroups", "cleared member list");

        assert!(!report.is_clean());
        assert_eq!(
            report.dirty_keys(),
            vec!["browser.tabs", "browser.tabGroups"]
        );
        assert!(report.format(false).contains("1 discarded, 2 repairs"));
    }
}
