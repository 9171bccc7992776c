//! Downloadable artifacts: a zip of the config files and a standalone script.

use std::io::{Cursor, Write};
use std::str::FromStr;

use anyhow::Context;

use crate::templates::{TemplateSet, WORKFLOW_DIR};

/// Download name of the config archive.
pub const ARCHIVE_FILE_NAME: &str = "gitleaks-config.zip";
/// Download name of the deployment script.
pub const SCRIPT_FILE_NAME: &str = "deploy-gitleaks.sh";
/// README entry inside the archive.
pub const README_ENTRY: &str = "README.md";

/// Heredoc delimiter; must never appear as a line of any template.
const HEREDOC_MARKER: &str = "LEAKWARD_EOF";

/// Build a deflated zip holding the three config files and a README.
pub fn config_archive(templates: &TemplateSet) -> anyhow::Result<Vec<u8>> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    let entries = templates
        .files()
        .into_iter()
        .map(|file| (file.path, file.contents))
        .chain([(README_ENTRY, templates.readme())]);

    for (name, contents) in entries {
        zip.start_file(name, options)
            .with_context(|| format!("Failed to start archive entry: {}", name))?;
        zip.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write archive entry: {}", name))?;
    }

    let cursor = zip.finish().context("Failed to finish config archive")?;
    Ok(cursor.into_inner())
}

/// Shell dialect of the generated deployment script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptFlavor {
    #[default]
    Bash,
}

impl FromStr for ScriptFlavor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bash" => Ok(ScriptFlavor::Bash),
            other => anyhow::bail!("Unsupported script type: {}", other),
        }
    }
}

/// Render a script that writes the three files into each path it is given.
///
/// File bodies are embedded through quoted heredocs, so the written files
/// are byte-identical to the templates.
pub fn deploy_script(templates: &TemplateSet, flavor: ScriptFlavor) -> String {
    match flavor {
        ScriptFlavor::Bash => bash_script(templates),
    }
}

fn bash_script(templates: &TemplateSet) -> String {
    let mut writes = String::new();
    for file in templates.files() {
        writes.push_str(&format!(
            "    cat > \"{path}\" <<'{marker}' || exit 1\n{body}{marker}\n",
            path = file.path,
            marker = HEREDOC_MARKER,
            body = file.contents,
        ));
    }

    format!(
        r#"#!/usr/bin/env bash
# GitLeaks auto-deployment script
set -euo pipefail

echo "GitLeaks Deployment Script"
echo "=========================="

# Runs in a subshell so `cd` and early exits stay local to one project.
deploy_to_project() (
    local project_path=$1
    if [ ! -d "$project_path" ]; then
        echo "Skipping $project_path: not a directory" >&2
        exit 1
    fi
    echo "Deploying to: $project_path"
    cd "$project_path" || exit 1

    mkdir -p {workflow_dir} || exit 1
{writes}
    echo "Deployed"
)

if [ $# -eq 0 ]; then
    echo "Usage: $0 <project-path> [project-path...]"
    exit 1
fi

status=0
for project in "$@"; do
    deploy_to_project "$project" || status=1
done

if [ "$status" -ne 0 ]; then
    echo "Some projects were not deployed" >&2
fi
exit "$status"
"#,
        workflow_dir = WORKFLOW_DIR,
        writes = writes,
    )
}
