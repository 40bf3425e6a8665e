//! Helpers shared by the tree model and the decorator

use crate::types::OperationArgument;

/// Render an operation as `name(type1,type2,...)`.
///
/// This string keys the signature index and is also what the agent expects
/// in bulk permission queries, since the bare name is ambiguous under
/// overloading.
///
/// ```rust
/// use jrbac_core::types::OperationArgument;
/// use jrbac_core::utils::operation_to_string;
///
/// let args = vec![
///     OperationArgument::new("p1", "java.lang.String"),
///     OperationArgument::new("p2", "boolean"),
/// ];
/// assert_eq!(operation_to_string("foo", &args), "foo(java.lang.String,boolean)");
/// assert_eq!(operation_to_string("start", &[]), "start()");
/// ```
pub fn operation_to_string(name: &str, args: &[OperationArgument]) -> String {
    let types: Vec<&str> = args.iter().map(|a| a.type_name.as_str()).collect();
    format!("{}({})", name, types.join(","))
}

/// True if `s` is empty or whitespace only
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
