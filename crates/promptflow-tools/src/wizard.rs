//! New-project wizard definition

use anyhow::Result;
use promptflow_core::{FlowBuilder, FlowDefinition, ResultMode};
use std::path::PathBuf;

/// Build tools offered by the wizard, as (label, value)
pub const BUILD_TOOLS: &[(&str, &str)] = &[
    ("Cargo", "cargo"),
    ("Gradle (Kotlin DSL)", "gradle-kotlin"),
    ("Maven", "maven"),
];

/// Optional project features, as (label, value)
pub const FEATURES: &[(&str, &str)] = &[
    ("HTTP server", "http"),
    ("Database access", "database"),
    ("Structured logging", "logging"),
    ("Metrics", "metrics"),
];

/// Values known before the wizard starts
#[derive(Debug, Clone, Default)]
pub struct WizardInputs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub directory: Option<PathBuf>,
    pub build: Option<String>,
    pub features: Option<Vec<String>>,

    /// Confirm supplied values interactively instead of accepting them
    pub verify: bool,
}

impl WizardInputs {
    /// Whether any step value was given up front
    pub fn has_supplied_values(&self) -> bool {
        self.name.is_some()
            || self.description.is_some()
            || self.directory.is_some()
            || self.build.is_some()
            || self.features.is_some()
    }

    fn supplied_mode(&self) -> ResultMode {
        if self.verify {
            ResultMode::Verify
        } else {
            ResultMode::Preset
        }
    }
}

/// Build the wizard flow; supplied values switch their step out of interactive mode
pub fn new_project_flow(inputs: &WizardInputs) -> Result<FlowDefinition> {
    let supplied = inputs.supplied_mode();

    let mut name = FlowBuilder::new()
        .with_text_input("name")
        .name("Project name")
        .default_value("demo");
    if let Some(value) = &inputs.name {
        name = name.result_value(value.as_str()).result_mode(supplied);
    }

    let mut description = name
        .and()
        .with_text_input("description")
        .name("Description");
    if let Some(value) = &inputs.description {
        description = description.result_value(value.as_str()).result_mode(supplied);
    }

    let mut directory = description
        .and()
        .with_path_input("directory")
        .name("Project directory")
        .default_value(".");
    if let Some(value) = &inputs.directory {
        directory = directory.result_value(value.clone()).result_mode(supplied);
    }

    let mut build = directory
        .and()
        .with_single_selector("build")
        .name("Build tool")
        .select_items(BUILD_TOOLS.iter().copied());
    if let Some(value) = &inputs.build {
        let value = parse_build_tool(value)?;
        build = build.result_value(value).result_mode(supplied);
    }

    let mut features = build
        .and()
        .with_multi_selector("features")
        .name("Features")
        .select_items(FEATURES.iter().copied());
    if let Some(values) = &inputs.features {
        let values = values
            .iter()
            .map(|v| parse_feature(v))
            .collect::<Result<Vec<_>>>()?;
        features = features.result_values(values).result_mode(supplied);
    }

    Ok(features.and().build()?)
}

fn parse_build_tool(s: &str) -> Result<&'static str> {
    match s.to_lowercase().as_str() {
        "cargo" => Ok("cargo"),
        "gradle" | "gradle-kotlin" => Ok("gradle-kotlin"),
        "maven" | "mvn" => Ok("maven"),
        _ => {
            let available: Vec<&str> = BUILD_TOOLS.iter().map(|(_, v)| *v).collect();
            anyhow::bail!(
                "Unknown build tool '{}'. Available: {}",
                s,
                available.join(", ")
            )
        }
    }
}

fn parse_feature(s: &str) -> Result<&'static str> {
    let wanted = s.trim().to_lowercase();
    match FEATURES.iter().find(|(_, value)| *value == wanted) {
        Some((_, value)) => Ok(*value),
        None => {
            let available: Vec<&str> = FEATURES.iter().map(|(_, v)| *v).collect();
            anyhow::bail!(
                "Unknown feature '{}'. Available: {}",
                s,
                available.join(", ")
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptflow_core::{Key, ScriptedTerminal};

    #[test]
    fn test_all_supplied_runs_without_input() {
        let inputs = WizardInputs {
            name: Some("shop".to_string()),
            description: Some("Online shop".to_string()),
            directory: Some(PathBuf::from("missing/dir")),
            build: Some("mvn".to_string()),
            features: Some(vec!["metrics".to_string(), "http".to_string()]),
            verify: false,
        };
        let flow = new_project_flow(&inputs).unwrap();
        assert!(flow.steps().iter().all(|s| s.mode == ResultMode::Preset));

        let (feeder, mut terminal) = ScriptedTerminal::channel();
        drop(feeder);
        let result = flow.run(&mut terminal).unwrap();

        let ctx = result.context();
        assert_eq!(ctx.text("name").unwrap(), "shop");
        assert_eq!(ctx.selected("build").unwrap(), "maven");
        // Preset values are committed as given
        assert_eq!(ctx.selections("features").unwrap(), ["metrics", "http"]);
        assert_eq!(terminal.draw_count(), 0);
    }

    #[test]
    fn test_defaults_when_nothing_supplied() {
        let flow = new_project_flow(&WizardInputs::default()).unwrap();
        assert!(flow
            .steps()
            .iter()
            .all(|s| s.mode == ResultMode::Interactive));

        let mut terminal = ScriptedTerminal::from_keys([
            Key::Enter,
            Key::Enter,
            Key::Enter,
            Key::Enter,
            Key::Char(' '),
            Key::Enter,
        ]);
        let result = flow.run(&mut terminal).unwrap();
        let ctx = result.context();
        assert_eq!(ctx.text("name").unwrap(), "demo");
        assert_eq!(ctx.text("description").unwrap(), "");
        assert_eq!(ctx.path("directory").unwrap(), PathBuf::from("."));
        assert_eq!(ctx.selected("build").unwrap(), "cargo");
        assert_eq!(ctx.selections("features").unwrap(), ["http"]);
    }

    #[test]
    fn test_verify_mode_starts_from_supplied_values() {
        let inputs = WizardInputs {
            build: Some("gradle".to_string()),
            features: Some(vec!["logging".to_string()]),
            verify: true,
            ..WizardInputs::default()
        };
        let flow = new_project_flow(&inputs).unwrap();
        let mut terminal = ScriptedTerminal::from_keys([Key::Enter; 5]);
        let result = flow.run(&mut terminal).unwrap();
        assert_eq!(result.context().selected("build").unwrap(), "gradle-kotlin");
        assert_eq!(result.context().selections("features").unwrap(), ["logging"]);
    }

    #[test]
    fn test_has_supplied_values() {
        assert!(!WizardInputs::default().has_supplied_values());
        let inputs = WizardInputs {
            verify: true,
            ..WizardInputs::default()
        };
        assert!(!inputs.has_supplied_values());
        let inputs = WizardInputs {
            features: Some(Vec::new()),
            ..WizardInputs::default()
        };
        assert!(inputs.has_supplied_values());
    }

    #[test]
    fn test_unknown_values_are_rejected() {
        let inputs = WizardInputs {
            build: Some("make".to_string()),
            ..WizardInputs::default()
        };
        let err = new_project_flow(&inputs).unwrap_err();
        assert!(err.to_string().contains("Unknown build tool"));

        let inputs = WizardInputs {
            features: Some(vec!["graphql".to_string()]),
            ..WizardInputs::default()
        };
        assert!(new_project_flow(&inputs).is_err());
    }
}
