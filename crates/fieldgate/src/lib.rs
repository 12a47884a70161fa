#![allow(missing_docs)]

pub mod binding;
pub mod doc;
pub mod engine;
pub mod evaluate;
pub mod field;
pub mod lint;
pub mod resolve;
pub mod selector;
pub mod state;
pub mod value;

pub use binding::BindingMap;
pub use doc::{DocError, FieldDef, FieldDefKind, FormDoc, OptionDef, doc_schema};
pub use engine::Engine;
pub use evaluate::{Evaluation, evaluate};
pub use field::{FieldKind, FieldNode, FieldRegistry, GroupOption};
pub use lint::{LintIssue, LintReport};
pub use resolve::{Resolved, option_ident, resolve};
pub use selector::{Condition, ConditionKind, ConditionSet, Operator, SkippedClause, Subfield};
pub use state::EngineEvent;
pub use value::{CondValue, compare};
