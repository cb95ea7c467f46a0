/// Максимальная длина строки статуса (в байтах, включая место под терминатор)
pub const STATUS_MAX_LENGTH: usize = 1024;

/// Удаляет пробельные символы в конце строки
pub fn rtrim(text: &str) -> &str {
    text.trim_end()
}

/// Обрезает строку до `max_len` байт, не разрывая UTF-8 символ
pub fn truncate_to_boundary(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }

    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Буфер последнего статуса фиксированной ёмкости.
/// Содержимое всегда короче `STATUS_MAX_LENGTH`.
#[derive(Debug, Clone)]
pub struct StatusBuffer {
    text: String,
}

impl StatusBuffer {
    pub fn new() -> Self {
        Self {
            text: String::with_capacity(STATUS_MAX_LENGTH),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Перезаписывает буфер, возвращает true если текст изменился
    pub fn set(&mut self, text: &str) -> bool {
        let text = truncate_to_boundary(text, STATUS_MAX_LENGTH - 1);
        if self.text == text {
            return false;
        }

        self.text.clear();
        self.text.push_str(text);
        true
    }
}

impl Default for StatusBuffer {
    fn default() -> Self {
        Self::new()
    }
}
