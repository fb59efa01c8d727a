//! # CanonicalDate — Data de Calendário Validada
//!
//! Toda data que sai do pipeline de extração passa por aqui. O tipo
//! [`CanonicalDate`] encapsula um `chrono::NaiveDate` que **só pode ser
//! construído** por validação de calendário real — `2021-02-30` ou mês 13
//! jamais viram uma `CanonicalDate`.
//!
//! ## Candidatas vs. Datas Canônicas
//!
//! ```text
//! Estratégia de extração
//!   ├── produz candidata crua: (dia, mês, ano) ou string
//!   ├── CanonicalDate::from_ymd() / parse_iso() → validação
//!   ├── Some(CanonicalDate) → data real, serializada "YYYY-MM-DD"
//!   └── None → candidata descartada, estágio sinaliza ausência
//! ```
//!
//! O módulo também concentra o **vocabulário de meses** em português usado
//! pelas estratégias de extração:
//!
//! | Tabela | Entradas | Uso |
//! |--------|----------|-----|
//! | [`MESES`] | 13 (inclui "marco" sem cedilha) | padrões `D de <mês> de YYYY` |
//! | [`MESES_ABREV`] | 12 | respostas da LLM com mês abreviado |

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Nomes de meses por extenso → número do mês.
///
/// Contém 13 entradas: os 12 meses mais a grafia "marco" sem cedilha,
/// comum em PDFs cuja extração de texto perde o caractere "ç".
pub const MESES: &[(&str, u32)] = &[
    ("janeiro", 1),
    ("fevereiro", 2),
    ("março", 3),
    ("marco", 3),
    ("abril", 4),
    ("maio", 5),
    ("junho", 6),
    ("julho", 7),
    ("agosto", 8),
    ("setembro", 9),
    ("outubro", 10),
    ("novembro", 11),
    ("dezembro", 12),
];

/// Abreviações de meses (3 letras, sem ponto) → número do mês.
pub const MESES_ABREV: &[(&str, u32)] = &[
    ("jan", 1),
    ("fev", 2),
    ("mar", 3),
    ("abr", 4),
    ("mai", 5),
    ("jun", 6),
    ("jul", 7),
    ("ago", 8),
    ("set", 9),
    ("out", 10),
    ("nov", 11),
    ("dez", 12),
];

/// Converte um nome de mês por extenso (lowercase) em número (1-12).
///
/// Busca linear na tabela [`MESES`] — para 13 entradas é mais eficiente
/// que um HashMap.
pub fn mes_para_numero(nome: &str) -> Option<u32> {
    MESES.iter().find(|(n, _)| *n == nome).map(|(_, num)| *num)
}

/// Converte uma abreviação de mês (lowercase, sem ponto) em número (1-12).
pub fn mes_abreviado_para_numero(nome: &str) -> Option<u32> {
    MESES_ABREV
        .iter()
        .find(|(n, _)| *n == nome)
        .map(|(_, num)| *num)
}

/// Data de calendário validada, serializada como `YYYY-MM-DD`.
///
/// Invariante: o valor interno sempre corresponde a uma data real do
/// calendário — a construção é a validação.
///
/// ## Exemplo de Uso
///
/// ```text
/// CanonicalDate::from_ymd(2021, 3, 17) → Some("2021-03-17")
/// CanonicalDate::from_ymd(2021, 2, 30) → None (fevereiro não tem dia 30)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CanonicalDate(NaiveDate);

impl CanonicalDate {
    /// Valida uma tripla (ano, mês, dia) contra o calendário real.
    ///
    /// # Retorno
    ///
    /// `None` para qualquer combinação que não exista no calendário
    /// (dia 32, mês 13, 30 de fevereiro, 29 de fevereiro fora de bissexto).
    pub fn from_ymd(ano: i32, mes: u32, dia: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(ano, mes, dia).map(Self)
    }

    /// Interpreta uma string `YYYY-MM-DD` (dia e mês aceitam 1-2 dígitos).
    pub fn parse_iso(texto: &str) -> Option<Self> {
        NaiveDate::parse_from_str(texto, "%Y-%m-%d").ok().map(Self)
    }

    /// Interpreta uma string em um formato `chrono` arbitrário.
    ///
    /// Usado pelo cliente de inferência remota para os formatos
    /// alternativos `D/M/YYYY` e `D-M-YYYY`.
    pub fn parse_com_formato(texto: &str, formato: &str) -> Option<Self> {
        NaiveDate::parse_from_str(texto, formato).ok().map(Self)
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for CanonicalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
