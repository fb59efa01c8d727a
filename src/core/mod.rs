//! # Módulo Core — Tipos Fundamentais do Domínio
//!
//! Este módulo agrupa os **tipos fundamentais** do processamento de atas.
//! Tudo no pipeline gira em torno deles:
//!
//! - [`CanonicalDate`] — data de calendário validada, serializada `YYYY-MM-DD`
//! - [`FileMetadata`] — metadados extraídos do nome do arquivo da ata
//! - [`AtaRecord`] — registro final `{ID, Data, CBH, Tipo, Texto}`
//!
//! ## Ciclo de Vida
//!
//! ```text
//! nome do arquivo ──► FileMetadata (ou pulado com diagnóstico)
//! texto do PDF    ──► candidata crua ──► CanonicalDate ou descartada
//! ambos           ──► AtaRecord (imutável após criação)
//! ```

/// Sub-módulo com [`CanonicalDate`] e o vocabulário de meses em português.
pub mod date;

/// Sub-módulo com o parser da convenção de nomes e o mapeamento de comitês.
pub mod metadata;

/// Sub-módulo com o registro estruturado [`AtaRecord`].
pub mod record;

// Re-exports para conveniência — permite usar `crate::core::CanonicalDate` diretamente.
pub use date::CanonicalDate;
pub use metadata::{FileMetadata, FilenameParser};
pub use record::AtaRecord;
