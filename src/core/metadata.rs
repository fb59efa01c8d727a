//! # Metadados de Arquivo — Convenção de Nomes das Atas
//!
//! As atas seguem a convenção fixa de nome de arquivo:
//!
//! ```text
//! Ata_CBH_<UF>_<AAAA>_<MM>_<Tipo>.pdf
//!          │     │     │     └── tipo de reunião (Ordinaria, Extraordinaria, ...)
//!          │     │     └── mês com dois dígitos
//!          │     └── ano com quatro dígitos
//!          └── código de 2 letras do Comitê de Bacia Hidrográfica
//! ```
//!
//! Arquivos fora da convenção são **pulados com diagnóstico** — nunca
//! derrubam o lote. O módulo também mantém o mapeamento código → nome
//! completo do comitê.

use regex::Regex;

/// Mapeamento código de 2 letras → nome completo do Comitê de Bacia.
///
/// Códigos fora da tabela são exibidos como o próprio código — atas de
/// comitês novos não podem ser descartadas por falta de mapeamento.
const CBH_NOMES: &[(&str, &str)] = &[
    ("LN", "Litoral Norte"),
    ("LS", "Litoral Sul"),
    ("PB", "Rio Paraíba"),
    ("PA", "Piranhas"),
];

/// Metadados extraídos do nome do arquivo de uma ata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    /// Código de 2 letras do comitê (ex: "LN").
    pub cbh_code: String,
    /// Ano com 4 dígitos, como aparece no nome do arquivo.
    pub ano: String,
    /// Mês com 2 dígitos, como aparece no nome do arquivo.
    pub mes: String,
    /// Tipo de reunião, em lowercase (ex: "ordinaria").
    pub tipo: String,
}

/// Parser da convenção de nomes `Ata_CBH_XX_AAAA_MM_Tipo.pdf`.
///
/// A regex é compilada uma única vez na construção e reutilizada para
/// todos os arquivos do lote.
pub struct FilenameParser {
    padrao: Regex,
}

impl FilenameParser {
    /// Cria o parser com a regex da convenção compilada.
    pub fn new() -> Self {
        Self {
            // Ancorada nas duas pontas: nada antes de "Ata_" nem depois de ".pdf"
            padrao: Regex::new(r"^Ata_CBH_([A-Z]{2})_(\d{4})_(\d{2})_([A-Za-z]+)\.pdf$")
                .expect("invalid regex"),
        }
    }

    /// Extrai os metadados do nome do arquivo.
    ///
    /// # Retorno
    ///
    /// `None` quando o nome não segue a convenção — o chamador decide
    /// pular o documento (com diagnóstico), nunca abortar o lote.
    pub fn parse(&self, nome_arquivo: &str) -> Option<FileMetadata> {
        let caps = self.padrao.captures(nome_arquivo)?;
        Some(FileMetadata {
            cbh_code: caps[1].to_string(),
            ano: caps[2].to_string(),
            mes: caps[3].to_string(),
            tipo: caps[4].to_lowercase(),
        })
    }
}

impl Default for FilenameParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Nome completo do comitê para um código de 2 letras.
///
/// Códigos desconhecidos retornam o próprio código.
pub fn nome_cbh(codigo: &str) -> &str {
    CBH_NOMES
        .iter()
        .find(|(c, _)| *c == codigo)
        .map(|(_, nome)| *nome)
        .unwrap_or(codigo)
}
