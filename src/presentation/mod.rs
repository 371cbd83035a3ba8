// Presentation layer - output for the rendering widget
pub mod output;
