use chess::Color;

/// Convert a chess color to a string
pub fn color_to_string(color: Color) -> String {
    match color {
        Color::White => "white".to_string(),
        Color::Black => "black".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colours_render_lowercase() {
        assert_eq!(color_to_string(Color::White), "white");
        assert_eq!(color_to_string(Color::Black), "black");
    }
}
