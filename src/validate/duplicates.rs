//! Duplicate definitions across trees.
//!
//! A name is a duplicate when more than one declaration binds it. Modules
//! and classes can be reopened, so all the reopenable scopes of a name
//! count as one definition; a constant or `::Struct.new` assignment with
//! the same name is still a second one. Colliding definitions are not
//! compared: two identical methods are reported like two conflicting ones.

use super::{Error, ErrorCollector, ValidatorKind};
use crate::index::{Index, IndexEntry};
use crate::model::{Node, ScopeKind, Tree};

/// Report every name bound more than once, as one error per name with a
/// section for each occurrence.
#[tracing::instrument(skip_all)]
pub fn validate<'a>(trees: impl IntoIterator<Item = &'a Tree>) -> (bool, Vec<Error>) {
    let index = Index::build(trees);
    let mut errors = ErrorCollector::new();

    for (_, entries) in index.iter() {
        if definitions(entries) < 2 {
            continue;
        }
        let first = &entries[0];
        let mut error = Error::at(
            ValidatorKind::Duplicates,
            format!("Duplicate definitions for `{}`", first.name),
            first.node,
        );
        for entry in entries {
            error = error.with_section(entry.loc());
        }
        errors.add(error);
    }

    errors.finish()
}

/// Distinct definitions among the bindings of one key.
fn definitions(entries: &[IndexEntry<'_>]) -> usize {
    let reopened = entries.iter().filter(|e| is_reopenable(e.node)).count();
    entries.len() - reopened + usize::from(reopened > 0)
}

fn is_reopenable(node: &Node) -> bool {
    match node {
        Node::Scope(scope) => !matches!(scope.kind, ScopeKind::Struct { .. }),
        _ => false,
    }
}
