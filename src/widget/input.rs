/// Height cap of the message box, in pixels.
pub const MAX_INPUT_HEIGHT: u32 = 120;

/// Layout constants used to derive the content height of the textbox, the
/// equivalent of `scrollHeight` in a browser.
#[derive(Debug, Clone, Copy)]
pub struct InputMetrics {
    pub line_height: u32,
    pub vertical_padding: u32,
    /// Soft-wrap width in characters. `None` disables wrapping.
    pub columns: Option<usize>,
    pub max_height: u32,
}

impl Default for InputMetrics {
    fn default() -> Self {
        Self {
            line_height: 20,
            vertical_padding: 16,
            columns: Some(60),
            max_height: MAX_INPUT_HEIGHT,
        }
    }
}

/// The growing multi-line message box.
#[derive(Debug, Clone)]
pub struct InputBox {
    value: String,
    height: u32,
    metrics: InputMetrics,
}

impl InputBox {
    pub fn new(metrics: InputMetrics) -> Self {
        let mut input = Self {
            value: String::new(),
            height: 0,
            metrics,
        };
        input.auto_resize();
        input
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.auto_resize();
    }

    /// Empty the box and return what it held.
    pub fn take(&mut self) -> String {
        let value = std::mem::take(&mut self.value);
        self.auto_resize();
        value
    }

    /// Reset the height to the content height, clamped to the maximum.
    pub fn auto_resize(&mut self) {
        self.height = self.content_height().min(self.metrics.max_height);
    }

    fn content_height(&self) -> u32 {
        let lines = visual_lines(&self.value, self.metrics.columns);
        let lines = u32::try_from(lines).unwrap_or(u32::MAX);
        lines
            .saturating_mul(self.metrics.line_height)
            .saturating_add(self.metrics.vertical_padding)
    }
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new(InputMetrics::default())
    }
}

fn visual_lines(text: &str, columns: Option<usize>) -> usize {
    text.split('\n')
        .map(|line| match columns {
            Some(cols) if cols > 0 => line.chars().count().div_ceil(cols).max(1),
            _ => 1,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_box_is_one_line_high() {
        let input = InputBox::default();
        assert_eq!(input.height(), 36);
    }

    #[test]
    fn grows_with_newlines() {
        let mut input = InputBox::default();
        input.set_value("a\nb\nc");
        assert_eq!(input.height(), 3 * 20 + 16);
    }

    #[test]
    fn long_lines_wrap() {
        let mut input = InputBox::new(InputMetrics {
            columns: Some(10),
            ..Default::default()
        });
        input.set_value("x".repeat(25));
        assert_eq!(input.height(), 3 * 20 + 16);
    }

    #[test]
    fn height_is_capped() {
        let mut input = InputBox::default();
        input.set_value("line\n".repeat(500));
        assert_eq!(input.height(), MAX_INPUT_HEIGHT);
        input.set_value("z".repeat(100_000));
        assert_eq!(input.height(), MAX_INPUT_HEIGHT);
    }

    #[test]
    fn take_shrinks_back() {
        let mut input = InputBox::default();
        input.set_value("a\nb\nc\nd");
        assert_eq!(input.take(), "a\nb\nc\nd");
        assert_eq!(input.value(), "");
        assert_eq!(input.height(), 36);
    }
}
