//! Static equipment catalog: laser heads, sub-modules, gadgets and vehicle
//! kinds. The built-in entries can be extended or overridden per scenario.
//!
//! Figures in the built-in catalog are sample values; scenario files are
//! expected to override them when the game data moves.

mod builtin;

use crate::engine::{AttachmentHead, Gadget, SubModule, UnitKind};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    pub heads: Vec<AttachmentHead>,
    pub modules: Vec<SubModule>,
    pub gadgets: Vec<Gadget>,
    pub vehicles: Vec<UnitKind>,
}

/// Replace entries of `base` sharing an id with `extra`, append the rest
fn merge_by_id<T, F>(base: &mut Vec<T>, extra: Vec<T>, id: F)
where
    F: Fn(&T) -> &str,
{
    for entry in extra {
        match base.iter().position(|e| id(e).eq_ignore_ascii_case(id(&entry))) {
            Some(i) => base[i] = entry,
            None => base.push(entry),
        }
    }
}

fn find<'a, T, F>(entries: &'a [T], wanted: &str, id: F) -> Option<&'a T>
where
    F: Fn(&T) -> &str,
{
    entries.iter().find(|e| id(e).eq_ignore_ascii_case(wanted))
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            heads: builtin::heads(),
            modules: builtin::modules(),
            gadgets: builtin::gadgets(),
            vehicles: builtin::vehicles(),
        }
    }

    /// Layer `overrides` on top of this catalog. Ids match case-insensitively.
    pub fn merged(mut self, overrides: Catalog) -> Self {
        merge_by_id(&mut self.heads, overrides.heads, |h| h.id.as_str());
        merge_by_id(&mut self.modules, overrides.modules, |m| m.id.as_str());
        merge_by_id(&mut self.gadgets, overrides.gadgets, |g| g.id.as_str());
        merge_by_id(&mut self.vehicles, overrides.vehicles, |v| v.id.as_str());
        self
    }

    pub fn head(&self, id: &str) -> Option<&AttachmentHead> {
        find(&self.heads, id, |h| h.id.as_str())
    }

    pub fn module(&self, id: &str) -> Option<&SubModule> {
        find(&self.modules, id, |m| m.id.as_str())
    }

    pub fn gadget(&self, id: &str) -> Option<&Gadget> {
        find(&self.gadgets, id, |g| g.id.as_str())
    }

    pub fn vehicle(&self, id: &str) -> Option<&UnitKind> {
        find(&self.vehicles, id, |v| v.id.as_str())
    }
}
