//! Template store for the files leakward deploys.
//!
//! The bodies are fixed for the lifetime of the process. A `TemplateSet` is
//! built once at startup and shared read-only by every deployer.

/// Workflow directory inside a repository.
pub const WORKFLOW_DIR: &str = ".github/workflows";
/// Repository-relative path of the CI workflow.
pub const WORKFLOW_PATH: &str = ".github/workflows/security.yml";
/// Repository-relative path of the pre-commit hook config.
pub const PRE_COMMIT_PATH: &str = ".pre-commit-config.yaml";
/// Repository-relative path of the scanner config.
pub const SCANNER_CONFIG_PATH: &str = ".gitleaks.toml";

const WORKFLOW: &str = r#"name: Security Scan

on:
  push:
    branches: ["**"]
  pull_request:
    branches: ["**"]

permissions:
  contents: read
  security-events: write

jobs:
  gitleaks:
    name: Scan for Secrets
    runs-on: ubuntu-latest
    
    steps:
      - name: Checkout code
        uses: actions/checkout@v4
        with:
          fetch-depth: 0

      - name: Run GitLeaks
        uses: gitleaks/gitleaks-action@v2
        env:
          GITHUB_TOKEN: ${{ secrets.GITHUB_TOKEN }}
          GITLEAKS_ENABLE_SUMMARY: true
"#;

const PRE_COMMIT: &str = r#"repos:
  - repo: https://github.com/gitleaks/gitleaks
    rev: v8.20.1
    hooks:
      - id: gitleaks
"#;

const SCANNER_CONFIG: &str = r#"# GitLeaks Configuration
# This config uses default rules and minimal allowlist
# to catch secrets effectively

title = "GitLeaks Security Scan"

[extend]
useDefault = true

[allowlist]
description = "Allowlist for known false positives only"

# Only ignore example/template files
paths = [
  '''\.env\.example$''',
  '''\.env\.template$''',
  '''\.env\.sample$''',
]

# Ignore common false positive patterns
regexes = [
  '''example\.com''',
  '''placeholder''',
  '''your-.*-here''',
  '''xxx+''',
]

# No commits ignored - scan everything
commits = []
"#;

const README: &str = r#"# GitLeaks Configuration Files

## Installation Instructions:

1. Extract these files to your project root
2. Commit and push:
   ```bash
   git add .github .pre-commit-config.yaml .gitleaks.toml
   git commit -m "Add GitLeaks security scanning"
   git push
   ```

3. That's it! GitLeaks is now active.
"#;

/// A single deployable file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to the repository root.
    pub path: &'static str,
    pub contents: &'static str,
}

/// The three configuration bodies plus the bundle README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    workflow: &'static str,
    pre_commit: &'static str,
    scanner_config: &'static str,
    readme: &'static str,
}

impl TemplateSet {
    /// The templates compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            workflow: WORKFLOW,
            pre_commit: PRE_COMMIT,
            scanner_config: SCANNER_CONFIG,
            readme: README,
        }
    }

    pub fn workflow(&self) -> &'static str {
        self.workflow
    }

    pub fn pre_commit(&self) -> &'static str {
        self.pre_commit
    }

    pub fn scanner_config(&self) -> &'static str {
        self.scanner_config
    }

    /// Installation notes shipped inside the downloadable bundle.
    pub fn readme(&self) -> &'static str {
        self.readme
    }

    /// Deployable files in write order.
    pub fn files(&self) -> [TemplateFile; 3] {
        [
            TemplateFile {
                path: WORKFLOW_PATH,
                contents: self.workflow,
            },
            TemplateFile {
                path: PRE_COMMIT_PATH,
                contents: self.pre_commit,
            },
            TemplateFile {
                path: SCANNER_CONFIG_PATH,
                contents: self.scanner_config,
            },
        ]
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}
