/// Warning channel for minor errors
///
/// Every warning is logged as it is raised and kept so the caller can show
/// it after the load finishes.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports a minor error; parsing continues
    pub fn minor(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{message}");
        self.warnings.push(message);
    }

    /// Reports an element nobody knows how to read
    pub fn unknown_tag(&mut self, tag: &str) {
        self.minor(format!("unknown tag <{tag}>"));
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}
