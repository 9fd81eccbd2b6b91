mod charts;
mod common;
mod validation;
