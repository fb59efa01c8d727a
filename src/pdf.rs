//! # Fonte de Texto — Extração e Normalização de PDF
//!
//! Colaborador de I/O do pipeline: entrega o texto bruto de uma ata em
//! PDF, já normalizado para Português Brasileiro. O pipeline trata este
//! módulo como uma função opaca `texto(caminho) → String`; texto vazio
//! significa documento improcessável (pulado com diagnóstico).
//!
//! ## Normalização PT-BR
//!
//! A extração de texto de PDF introduz artefatos que quebram as frases
//! de data que o pipeline precisa casar:
//!
//! - **NFC**: "ã" pode vir decomposto ("a" + combinante U+0303); a forma
//!   composta garante que as tabelas de substituição casem por substring
//! - **Sílabas quebradas**: espaços espúrios antes de sufixos comuns
//!   ("reuni ão" → "reunião", "delibera ção" → "deliberação")

use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Fonte de texto de atas em PDF.
///
/// A regex de reconstrução de sílabas é compilada uma única vez e
/// reutilizada para todos os documentos do lote.
pub struct PdfTextSource {
    sufixo_re: Regex,
}

impl PdfTextSource {
    /// Cria a fonte com a regex de normalização compilada.
    pub fn new() -> Self {
        Self {
            // (palavra)(espaço)(sufixo PT-BR) → (palavra)(sufixo)
            sufixo_re: Regex::new(r"(\w+)\s+(ção|ções|ão|cia|ência|ância|mente|dade|ável|ível)")
                .expect("invalid regex"),
        }
    }

    /// Extrai o texto integral de um PDF, normalizado e com bordas aparadas.
    ///
    /// # Erros
    ///
    /// Retorna erro quando o arquivo não pode ser lido ou o PDF não tem
    /// camada de texto extraível — o chamador converte em "documento
    /// pulado", nunca em aborto do lote.
    pub fn ler(&self, caminho: &Path) -> Result<String> {
        let bruto = pdf_extract::extract_text(caminho)
            .with_context(|| format!("Falha ao extrair texto de {}", caminho.display()))?;
        Ok(self.normalizar(&bruto).trim().to_string())
    }

    /// Normaliza texto extraído de PDF: NFC + reconstrução de sílabas.
    fn normalizar(&self, texto: &str) -> String {
        let composto: String = texto.nfc().collect();
        self.sufixo_re.replace_all(&composto, "$1$2").into_owned()
    }
}

impl Default for PdfTextSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── normalização ──────────────────────────────────────────

    #[test]
    fn junta_sufixo_separado_por_espaco() {
        let fonte = PdfTextSource::new();
        assert_eq!(fonte.normalizar("delibera ção aprovada"), "deliberação aprovada");
    }

    #[test]
    fn junta_reuniao_quebrada() {
        let fonte = PdfTextSource::new();
        assert_eq!(fonte.normalizar("reuni ão ordinária"), "reunião ordinária");
    }

    #[test]
    fn recompoe_caracteres_decompostos() {
        let fonte = PdfTextSource::new();
        // "março" com cedilha decomposta (c + U+0327)
        let decomposto = "marc\u{0327}o";
        assert_eq!(fonte.normalizar(decomposto), "março");
    }

    #[test]
    fn texto_integro_passa_inalterado() {
        let fonte = PdfTextSource::new();
        let texto = "Aos dezessete dias do mês de março";
        assert_eq!(fonte.normalizar(texto), texto);
    }
}
