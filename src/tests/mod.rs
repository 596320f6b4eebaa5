mod signal;
mod support;
mod widgets;
