//! Promptflow Core - Multi-step terminal prompt flows
//!
//! This library drives terminal wizards: an ordered sequence of prompt steps
//! (free text, filesystem path, single choice, multi choice) executed against
//! one shared terminal, producing a single context of typed results.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Definitions** - `StepDefinition`, `FlowBuilder` and the immutable `FlowDefinition`
//! - **Layer 2: Execution** - `FlowExecutor` walking a definition, one prompt renderer per step kind
//! - **Layer 3: Terminal** - the `Terminal` trait, a scripted terminal and a console terminal (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables `ConsoleTerminal`, backed by `console` and styled with `colored`
//!
//! # Example Usage
//!
//! ```ignore
//! use promptflow_core::{FlowBuilder, FlowExecutor, ScriptedTerminal, Key};
//!
//! let flow = FlowBuilder::new()
//!     .with_text_input("name")
//!         .name("Project name")
//!         .default_value("demo")
//!         .and()
//!     .build()?;
//!
//! let mut terminal = ScriptedTerminal::from_keys([Key::Enter]);
//! let result = FlowExecutor::new(&mut terminal).run(&flow)?;
//! let name: String = result.get("name")?;
//! ```

pub mod builder;
pub mod config;
pub mod context;
pub mod executor;
pub mod keys;
pub mod prompt;
pub mod step;
pub mod terminal;
pub mod value;

// Re-export main types for convenience
pub use builder::{ConfigurationError, FlowBuilder, FlowDefinition};
pub use config::PromptTheme;
pub use context::{ContextError, FlowContext, FlowResult, FlowStatus};
pub use executor::{FlowError, FlowExecutor};
pub use keys::{parse_keys, KeyParseError};
pub use step::{ResultMode, SelectItem, StepDefinition, StepKind};
pub use terminal::scripted::{KeyFeeder, ScriptedTerminal};
pub use terminal::{Frame, FrameLine, Key, LineStyle, Terminal};
pub use value::{FlowValue, FromFlowValue, ValueKind};

#[cfg(feature = "tui")]
pub use terminal::console::ConsoleTerminal;
