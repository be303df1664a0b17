use std::borrow::Cow;

/// Lines inserted ahead of a Python module's imports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPreamble {
    /// A file containing any of these is considered already migrated
    pub markers: Vec<String>,
    pub lines: Vec<String>,
}

impl ImportPreamble {
    pub fn flowglad() -> Self {
        Self {
            markers: vec!["import flowglad".to_string(), "from flowglad".to_string()],
            lines: vec![
                "import flowglad".to_string(),
                "from dotenv import load_dotenv".to_string(),
                "load_dotenv()".to_string(),
                String::new(),
            ],
        }
    }

    /// Insert the preamble before the first top-level import line.
    ///
    /// No-op when a marker is already present or when no line starts with
    /// `import ` / `from `, so repeated calls never duplicate the preamble.
    pub fn inject<'t>(&self, code: &'t str) -> Cow<'t, str> {
        let mut lines: Vec<&str> = code.split('\n').collect();

        if lines
            .iter()
            .any(|line| self.markers.iter().any(|m| line.contains(m.as_str())))
        {
            return Cow::Borrowed(code);
        }

        let Some(position) = lines
            .iter()
            .position(|line| line.starts_with("import ") || line.starts_with("from "))
        else {
            return Cow::Borrowed(code);
        };

        lines.splice(position..position, self.lines.iter().map(String::as_str));
        Cow::Owned(lines.join("\n"))
    }
}

impl Default for ImportPreamble {
    fn default() -> Self {
        Self::flowglad()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserts_before_first_import() {
        let preamble = ImportPreamble::flowglad();
        let code = "#!/usr/bin/env python\nimport os\nimport json\n";
        assert_eq!(
            preamble.inject(code),
            "#!/usr/bin/env python\nimport flowglad\nfrom dotenv import load_dotenv\nload_dotenv()\n\nimport os\nimport json\n"
        );
    }

    #[test]
    fn test_idempotent() {
        let preamble = ImportPreamble::flowglad();
        let once = preamble.inject("from decimal import Decimal\n").into_owned();
        let twice = preamble.inject(&once);
        assert_eq!(once, twice);
        assert_eq!(once.matches("import flowglad").count(), 1);
    }

    #[test]
    fn test_indented_imports_do_not_count() {
        let preamble = ImportPreamble::flowglad();
        let code = "def f():\n    import os\n    return os.getcwd()";
        assert!(matches!(preamble.inject(code), Cow::Borrowed(_)));
    }

    #[test]
    fn test_existing_marker_skips() {
        let preamble = ImportPreamble::flowglad();
        let code = "import os\nfrom flowglad import FlowGlad\n";
        assert_eq!(preamble.inject(code), code);
    }
}
