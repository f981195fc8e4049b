//! Wildcard-argument list construction.

use autoargs_core::config::AutoArgsConfig;
use autoargs_core::syntax::{factory, GreenNode};
use tracing::debug;

use crate::type_syntax::create_type_syntax;

/// Builds argument lists of wildcard matchers such as
/// `(Arg.Any<int>(), Arg.Any<string>())`.
#[derive(Debug, Clone)]
pub struct ArgumentFactory {
    matcher_type: String,
    matcher_method: String,
}

impl ArgumentFactory {
    pub fn new(config: &AutoArgsConfig) -> Self {
        ArgumentFactory {
            matcher_type: config.matcher_type.clone(),
            matcher_method: config.matcher_method.clone(),
        }
    }

    /// `Matcher.Method<T>()` for one type node.
    fn matcher_call(&self, type_node: GreenNode) -> GreenNode {
        let callee = factory::member_access(
            factory::identifier_name(&self.matcher_type),
            factory::generic_name(
                &self.matcher_method,
                factory::type_argument_list([type_node]),
            ),
        );
        factory::invocation(callee, factory::argument_list(Vec::new()))
    }

    /// One wildcard argument per type name, in order.
    ///
    /// Type names that do not parse are left out, so the list can be
    /// shorter than `type_names`.
    pub fn create_args_any<S: AsRef<str>>(&self, type_names: &[S]) -> GreenNode {
        let arguments = type_names.iter().filter_map(|name| {
            let name = name.as_ref();
            match create_type_syntax(name) {
                Some(type_node) => Some(factory::argument(self.matcher_call(type_node))),
                None => {
                    debug!(type_name = name, "dropping parameter with unparsable type");
                    None
                }
            }
        });
        factory::argument_list(arguments)
    }
}

impl Default for ArgumentFactory {
    fn default() -> Self {
        Self::new(&AutoArgsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoargs_core::syntax::SyntaxKind;

    #[test]
    fn builds_one_matcher_per_type() {
        let args = ArgumentFactory::default().create_args_any(&["int", "string"]);
        assert_eq!(args.kind(), SyntaxKind::ArgumentList);
        assert_eq!(args.to_string(), "(Arg.Any<int>(), Arg.Any<string>())");
    }

    #[test]
    fn empty_type_list_gives_empty_parens() {
        let none: [&str; 0] = [];
        assert_eq!(ArgumentFactory::default().create_args_any(&none).to_string(), "()");
    }

    #[test]
    fn complex_types_are_embedded_verbatim() {
        let args = ArgumentFactory::default()
            .create_args_any(&["Dictionary<string, List<int>>", "int[]", "(int, bool)"]);
        assert_eq!(
            args.to_string(),
            "(Arg.Any<Dictionary<string, List<int>>>(), Arg.Any<int[]>(), Arg.Any<(int, bool)>())"
        );
    }

    #[test]
    fn unparsable_types_are_dropped() {
        let args = ArgumentFactory::default().create_args_any(&["int", "List<", "bool"]);
        assert_eq!(args.to_string(), "(Arg.Any<int>(), Arg.Any<bool>())");
    }

    #[test]
    fn matcher_names_come_from_config() {
        let config = AutoArgsConfig {
            matcher_type: "It".to_string(),
            matcher_method: "IsAny".to_string(),
            ..AutoArgsConfig::default()
        };
        let args = ArgumentFactory::new(&config).create_args_any(&["int"]);
        assert_eq!(args.to_string(), "(It.IsAny<int>())");
    }
}
