//! Scope and binding resolution for the debug-macros expander.
//!
//! Bindings are resolved lexically from any node by walking its parent chain:
//! the program, every block, and every function parameter list form a scope.
//! `var` declarations are hoisted to the enclosing function body or program.
//! Function declarations stay block scoped, as in strict module code.

mod binding;
mod resolve;
mod uid;

pub use binding::{Binding, BindingKind};
pub use resolve::{get_binding, has_binding, scope_bindings};
pub use uid::UidGenerator;
