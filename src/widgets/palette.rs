use std::borrow::Cow;

/// Keyboard behaviour for single-value selectors.
#[derive(Debug, Clone)]
pub struct SelectorBehaviour {
    pub wrap_around: bool,
}

impl SelectorBehaviour {
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap_around = wrap;
        self
    }
}

impl Default for SelectorBehaviour {
    fn default() -> Self {
        Self { wrap_around: true }
    }
}

/// Text shown for values that have no natural rendering.
#[derive(Debug, Clone)]
pub struct DisplayLabels {
    pub empty_selection: Cow<'static, str>,
    pub not_a_number: Cow<'static, str>,
}

impl DisplayLabels {
    pub fn with_empty_selection(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.empty_selection = label.into();
        self
    }

    pub fn with_not_a_number(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.not_a_number = label.into();
        self
    }
}

impl Default for DisplayLabels {
    fn default() -> Self {
        Self {
            empty_selection: Cow::Borrowed("<none>"),
            not_a_number: Cow::Borrowed(""),
        }
    }
}

/// Presentation settings shared by every widget of a form.
#[derive(Debug, Clone, Default)]
pub struct WidgetPalette {
    pub selector: SelectorBehaviour,
    pub labels: DisplayLabels,
}

impl WidgetPalette {
    pub fn with_selector_behaviour(mut self, behaviour: SelectorBehaviour) -> Self {
        self.selector = behaviour;
        self
    }

    pub fn with_labels(mut self, labels: DisplayLabels) -> Self {
        self.labels = labels;
        self
    }
}
