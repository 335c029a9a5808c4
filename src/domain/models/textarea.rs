use ratatui::prelude::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

pub struct TextArea {}

impl<'a> TextArea {
    // Inputs here hold one line, where the default underlined cursor line
    // reads as a stray divider.
    pub fn new(title: &'a str) -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(title)
                .padding(Padding::new(1, 1, 0, 0)),
        );

        return textarea;
    }

    pub fn new_secret(title: &'a str) -> tui_textarea::TextArea<'a> {
        let mut textarea = TextArea::new(title);
        textarea.set_mask_char('*');

        return textarea;
    }
}
