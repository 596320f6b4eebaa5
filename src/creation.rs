use futures::future::BoxFuture;

use crate::reference::{RefOption, ReferenceKind};

/// Where the "add new option" affordance of a widget leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOptionLink {
    pub url: String,
    pub kind: ReferenceKind,
}

impl AddOptionLink {
    pub fn new(url: impl Into<String>, kind: ReferenceKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationOutcome {
    Created(RefOption),
    Cancelled,
}

/// Opens the external record-creation surface behind an [`AddOptionLink`].
pub trait CreationFlow {
    fn launch(&mut self, link: &AddOptionLink) -> BoxFuture<'_, CreationOutcome>;
}

/// Permission check consulted before an "add new option" affordance is shown.
pub trait Authorizer {
    fn can_create(&self, kind: &ReferenceKind) -> bool;
}

impl<F> Authorizer for F
where
    F: Fn(&ReferenceKind) -> bool,
{
    fn can_create(&self, kind: &ReferenceKind) -> bool {
        self(kind)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn can_create(&self, _kind: &ReferenceKind) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl Authorizer for DenyAll {
    fn can_create(&self, _kind: &ReferenceKind) -> bool {
        false
    }
}

pub(crate) fn can_offer(link: Option<&AddOptionLink>, authorizer: &dyn Authorizer) -> bool {
    link.is_some_and(|link| !link.url.is_empty() && authorizer.can_create(&link.kind))
}
