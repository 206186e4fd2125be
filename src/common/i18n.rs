// src/common/i18n.rs

use std::collections::HashMap;

const DEFAULT_LANG: &str = "en";

// (idioma, chave, mensagem)
const MESSAGES: &[(&str, &str, &str)] = &[
    ("en", "invalid_report_type", "Invalid report type"),
    ("pt", "invalid_report_type", "Tipo de relatório inválido"),
    ("en", "invalid_token", "Invalid or missing authentication token"),
    ("pt", "invalid_token", "Token de autenticação inválido ou ausente."),
    ("en", "internal_error", "An unexpected error occurred"),
    ("pt", "internal_error", "Ocorreu um erro inesperado."),
];

/// Mensagens de erro por idioma. Idioma desconhecido cai no inglês.
#[derive(Debug, Clone)]
pub struct I18nStore {
    // idioma -> chave -> mensagem
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages: HashMap<&'static str, HashMap<&'static str, &'static str>> = HashMap::new();
        for &(lang, key, text) in MESSAGES {
            messages.entry(lang).or_default().insert(key, text);
        }
        Self { messages }
    }

    pub fn get(&self, lang: &str, key: &str) -> String {
        let lookup = |lang: &str| self.messages.get(lang).and_then(|texts| texts.get(key));

        lookup(lang)
            .or_else(|| lookup(DEFAULT_LANG))
            .map(|text| text.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falls_back_to_english() {
        let store = I18nStore::new();
        assert_eq!(store.get("pt", "invalid_report_type"), "Tipo de relatório inválido");
        assert_eq!(store.get("de", "invalid_report_type"), "Invalid report type");
        assert_eq!(store.get("en", "chave_desconhecida"), "chave_desconhecida");
    }
}
