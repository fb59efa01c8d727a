//! # Processamento em Lote — Do Diretório à Tabela de Registros
//!
//! Varre um diretório de atas em PDF e produz um [`AtaRecord`] por
//! documento processável. É o invólucro de I/O em torno do pipeline de
//! extração:
//!
//! ```text
//! Diretório
//!   ├── 1. Lista arquivos "Ata_CBH*.pdf" (ordenados — lote determinístico)
//!   ├── 2. Para cada arquivo:
//!   │   ├── Metadados do nome → fora da convenção? pula com diagnóstico
//!   │   ├── Texto do PDF → vazio/ilegível? pula com diagnóstico
//!   │   └── Pipeline de datas → registro (data pode ficar ausente)
//!   └── 3. Coleta os registros na ordem dos arquivos
//! ```
//!
//! ## Política de Erros
//!
//! Documento improcessável (nome fora da convenção, PDF sem texto) é
//! **pulado**, nunca aborta o lote. Data não encontrada mantém o
//! documento no resultado com data nula. O lote completa mesmo que toda
//! extração de data falhe.
//!
//! ## Paralelismo
//!
//! Cada documento é processado de forma independente e sem estado
//! compartilhado mutável — as tabelas de substituição são somente
//! leitura. Com `paralelo = true` o lote usa `rayon`; a ordem dos
//! registros resultantes é a mesma da varredura sequencial.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::core::metadata::nome_cbh;
use crate::core::{AtaRecord, FilenameParser};
use crate::extract::DateExtractor;
use crate::pdf::PdfTextSource;

/// Processador de lote de atas.
pub struct AtaProcessor {
    diretorio: PathBuf,
    parser: FilenameParser,
    pdf: PdfTextSource,
    extractor: DateExtractor,
    paralelo: bool,
}

impl AtaProcessor {
    /// Cria o processador para um diretório de atas.
    pub fn new(diretorio: PathBuf, extractor: DateExtractor, paralelo: bool) -> Self {
        Self {
            diretorio,
            parser: FilenameParser::new(),
            pdf: PdfTextSource::new(),
            extractor,
            paralelo,
        }
    }

    /// Processa todos os arquivos de ata do diretório.
    ///
    /// # Erros
    ///
    /// Só falha se o próprio diretório não puder ser listado; problemas
    /// em documentos individuais viram diagnósticos, nunca erro.
    pub fn processar_todos(&self) -> Result<Vec<AtaRecord>> {
        let arquivos = self.listar_atas()?;
        tracing::info!(
            total = arquivos.len(),
            diretorio = %self.diretorio.display(),
            "Encontrados arquivos PDF para processar"
        );

        let registros: Vec<AtaRecord> = if self.paralelo {
            arquivos
                .par_iter()
                .filter_map(|nome| self.processar_arquivo(nome))
                .collect()
        } else {
            arquivos
                .iter()
                .filter_map(|nome| self.processar_arquivo(nome))
                .collect()
        };

        Ok(registros)
    }

    /// Processa um único arquivo de ata.
    ///
    /// # Retorno
    ///
    /// `None` para documento improcessável (nome fora da convenção ou
    /// texto vazio/ilegível) — pulado com diagnóstico. Data ausente NÃO
    /// torna o documento improcessável.
    pub fn processar_arquivo(&self, nome: &str) -> Option<AtaRecord> {
        tracing::info!(arquivo = nome, "Processando");

        let metadata = match self.parser.parse(nome) {
            Some(m) => m,
            None => {
                tracing::warn!(arquivo = nome, "Formato de nome inválido, pulando");
                return None;
            }
        };
        tracing::debug!(
            cbh = %metadata.cbh_code,
            ano = %metadata.ano,
            mes = %metadata.mes,
            tipo = %metadata.tipo,
            "Metadados extraídos do nome do arquivo"
        );

        let caminho = self.diretorio.join(nome);
        let texto = match self.pdf.ler(&caminho) {
            Ok(t) if !t.is_empty() => t,
            Ok(_) => {
                tracing::warn!(arquivo = nome, "Texto vazio, pulando");
                return None;
            }
            Err(e) => {
                tracing::warn!(arquivo = nome, error = %e, "Erro na leitura, pulando");
                return None;
            }
        };

        let data = self.extractor.extract(&texto, nome);
        if data.is_none() {
            tracing::warn!(arquivo = nome, "Nenhuma data encontrada no texto");
        }

        Some(AtaRecord {
            id: nome.to_string(),
            data,
            cbh: nome_cbh(&metadata.cbh_code).to_string(),
            tipo: metadata.tipo,
            texto,
        })
    }

    /// Lista os nomes de arquivo de ata do diretório, em ordem
    /// lexicográfica — a ordem fixa mantém o lote determinístico entre
    /// execuções.
    fn listar_atas(&self) -> Result<Vec<String>> {
        let entradas = std::fs::read_dir(&self.diretorio)
            .with_context(|| format!("Falha ao listar {}", self.diretorio.display()))?;

        let mut nomes: Vec<String> = entradas
            .filter_map(|entrada| entrada.ok())
            .filter_map(|entrada| entrada.file_name().into_string().ok())
            .filter(|nome| e_ata_pdf(nome))
            .collect();
        nomes.sort();
        Ok(nomes)
    }
}

/// Um nome de arquivo é candidato a ata quando começa com `Ata_CBH` e
/// termina em `.pdf` (extensão case-insensitive).
fn e_ata_pdf(nome: &str) -> bool {
    nome.starts_with("Ata_CBH") && nome.to_lowercase().ends_with(".pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── filtro de candidatos ──────────────────────────────────

    #[test]
    fn aceita_ata_com_extensao_minuscula() {
        assert!(e_ata_pdf("Ata_CBH_LN_2022_05_Ordinaria.pdf"));
    }

    #[test]
    fn aceita_extensao_maiuscula() {
        assert!(e_ata_pdf("Ata_CBH_LN_2022_05_Ordinaria.PDF"));
    }

    #[test]
    fn rejeita_prefixo_diferente() {
        assert!(!e_ata_pdf("Resolucao_CBH_LN_2022.pdf"));
        assert!(!e_ata_pdf("minutes.pdf"));
    }

    #[test]
    fn rejeita_extensao_diferente() {
        assert!(!e_ata_pdf("Ata_CBH_LN_2022_05_Ordinaria.docx"));
    }
}
