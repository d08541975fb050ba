//! Flattens the option declarations of a whole descriptor tree into one
//! global, conflict-checked set.
//!
//! The tokenizer must recognize every possible flag before the route is
//! known, so the set spans the entire tree. Requiredness is cleared on
//! the way in; it is enforced post-resolution against the options of the
//! active descriptor only.

use tracing::debug;

use crate::opt::{OptGroup, OptSpec};
use crate::{DeclError, Descriptor, Result};

/// The flattened union of every option and option group reachable from
/// the tree root. Built once at startup and reused for every parse.
#[derive(Debug, Clone, Default)]
pub struct OptSet {
    options: Vec<OptSpec>,
    groups: Vec<OptGroup>,
}

impl OptSet {
    pub fn new() -> OptSet {
        OptSet::default()
    }

    pub fn options(&self) -> &[OptSpec] {
        &self.options
    }

    pub fn groups(&self) -> &[OptGroup] {
        &self.groups
    }

    /// Look up by short or long name.
    pub fn find(&self, name: &str) -> Option<&OptSpec> {
        self.options.iter().find(|it| it.matches(name))
    }

    pub fn find_short(&self, name: &str) -> Option<&OptSpec> {
        self.options.iter().find(|it| it.matches_short(name))
    }

    pub fn find_long(&self, name: &str) -> Option<&OptSpec> {
        self.options.iter().find(|it| it.matches_long(name))
    }

    /// Insert an option, rejecting any clash with an already-present
    /// option of the same short or long name but a different shape.
    /// Identical re-declarations (the same flag on several commands)
    /// collapse into one entry.
    pub fn add(&mut self, opt: OptSpec) -> Result<(), DeclError> {
        let mut known = false;
        if let Some(short) = opt.short() {
            if let Some(existing) = self.find_short(&short.to_string()) {
                assert_similar(&opt, existing)?;
                known = true;
            }
        }
        if let Some(long) = opt.long() {
            if let Some(existing) = self.find_long(long) {
                assert_similar(&opt, existing)?;
                known = true;
            }
        }
        if !known {
            self.options.push(opt);
        }
        Ok(())
    }

    /// Insert a group as-is, registering its member options so the
    /// tokenizer recognizes them. Group members carry no cross-tree
    /// conflict checking; exclusivity is enforced per parse.
    pub fn add_group(&mut self, group: OptGroup) {
        for opt in group.options() {
            let opt = opt.normalized();
            if self.find(&opt.key()).is_none() {
                self.options.push(opt);
            }
        }
        self.groups.push(group);
    }
}

/// Walk the tree depth-first and collect one global option set.
///
/// Deterministic for a given tree, and independent of child-visit order
/// for conflict-free trees: an option either lands in the set unchanged
/// or trips a conflict reporting both definitions.
pub fn aggregate(root: &Descriptor) -> Result<OptSet, DeclError> {
    let mut set = OptSet::new();
    collect(&mut set, root)?;
    debug!(options = set.options.len(), groups = set.groups.len(), "aggregated global option set");
    Ok(set)
}

fn collect(set: &mut OptSet, descriptor: &Descriptor) -> Result<(), DeclError> {
    for opt in descriptor.options() {
        set.add(opt.normalized())?;
    }
    for group in descriptor.option_groups() {
        set.add_group(group.clone());
    }
    if let Descriptor::Route(route) = descriptor {
        for sub in route.sub_commands() {
            collect(set, sub)?;
        }
    }
    Ok(())
}

/// Two options sharing a name must agree on every functionally
/// significant property.
fn assert_similar(new: &OptSpec, existing: &OptSpec) -> Result<(), DeclError> {
    let field = if new.short() != existing.short() {
        Some("short name")
    } else if new.long() != existing.long() {
        Some("long name")
    } else if new.is_required() != existing.is_required() {
        Some("required setting")
    } else if new.value_count() != existing.value_count() {
        Some("value count")
    } else if new.has_optional_value() != existing.has_optional_value() {
        Some("optional value setting")
    } else if new.value_separator() != existing.value_separator() {
        Some("value separator")
    } else {
        None
    };
    match field {
        Some(field) => Err(DeclError::OptionConflict {
            field,
            new: format!("{new:?}"),
            existing: format!("{existing:?}"),
        }),
        None => Ok(()),
    }
}
