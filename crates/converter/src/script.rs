use crate::types::CodeTransformation;
use std::fmt::Write;

/// Environment variables renamed in `.env` by the migration script
pub const ENV_RENAMES: &[(&str, &str)] = &[
    ("STRIPE_SECRET_KEY", "FLOWGLAD_SECRET_KEY"),
    ("STRIPE_PUBLISHABLE_KEY", "FLOWGLAD_PUBLISHABLE_KEY"),
    ("SQUARE_ACCESS_TOKEN", "FLOWGLAD_SECRET_KEY"),
    ("SQUARE_ENVIRONMENT", "FLOWGLAD_ENVIRONMENT"),
];

const SCRIPT_HEADER: &str = r#"#!/usr/bin/env python3
"""
FlowGlad Migration Script
Automatically converts Stripe/Square code to FlowGlad
"""

import os
import shutil
from datetime import datetime


def backup_files(files):
    backup_dir = f"backup_{datetime.now().strftime('%Y%m%d_%H%M%S')}"
    os.makedirs(backup_dir, exist_ok=True)
    for file in files:
        target = os.path.join(backup_dir, file)
        os.makedirs(os.path.dirname(target), exist_ok=True)
        shutil.copy2(file, target)
    return backup_dir


def apply_transformations(transformations):
    for transform in transformations:
        with open(transform["file_path"], "w") as f:
            f.write(transform["transformed_code"])
    print(f"Applied {len(transformations)} transformations")


def update_env_file():
    if not os.path.exists(".env"):
        return
    with open(".env") as f:
        content = f.read()
    for old, new in ENV_UPDATES.items():
        content = content.replace(old, new)
    with open(".env", "w") as f:
        f.write(content)
    print("Updated .env file")

"#;

const SCRIPT_FOOTER: &str = r#"

def main():
    files = [t["file_path"] for t in TRANSFORMATIONS]
    backup_dir = backup_files(files)
    print(f"Created backup in {backup_dir}")

    apply_transformations(TRANSFORMATIONS)
    update_env_file()

    print("Migration complete!")
    print("Run 'pip install flowglad' to install the FlowGlad SDK")


if __name__ == "__main__":
    main()
"#;

/// Standalone Python script that backs up, rewrites and re-keys a checkout.
///
/// Transformations without a file path cannot be applied and are left out.
/// String values are emitted as JSON string literals, which Python reads
/// unchanged whatever quotes or backslashes the code contains.
pub(crate) fn render(transformations: &[CodeTransformation]) -> String {
    let mut script = String::from(SCRIPT_HEADER);

    script.push_str("\nENV_UPDATES = {\n");
    for (old, new) in ENV_RENAMES {
        let _ = writeln!(script, "    {}: {},", literal(old), literal(new));
    }
    script.push_str("}\n\nTRANSFORMATIONS = [\n");

    for t in transformations {
        if t.file_path.is_empty() {
            log::debug!("Skipping transformation without a file path");
            continue;
        }
        script.push_str("    {\n");
        let _ = writeln!(script, "        \"file_path\": {},", literal(&t.file_path));
        let _ = writeln!(
            script,
            "        \"transformed_code\": {},",
            literal(&t.transformed_code)
        );
        script.push_str("    },\n");
    }
    script.push(']');

    script.push_str(SCRIPT_FOOTER);
    script
}

fn literal(text: &str) -> String {
    serde_json::Value::from(text).to_string()
}
