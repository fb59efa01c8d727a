//! # cbh-atas — Extração de Datas e Metadados de Atas de CBH
//!
//! **Ponto de entrada principal** da ferramenta de linha de comando.
//!
//! Varre um diretório de atas de reunião em PDF (convenção
//! `Ata_CBH_<UF>_<AAAA>_<MM>_<Tipo>.pdf`), extrai a data da reunião do
//! corpo do texto com um pipeline de fallback em três estágios, e imprime
//! a tabela `{ID, Data, CBH, Tipo, Texto}` ordenada por data.
//!
//! ## Fluxo de Execução
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging (RUST_LOG)
//!   ├── Monta o pipeline de extração
//!   │   ├── PatternMatcher (regex)
//!   │   ├── LexicalDecoder (datas por extenso)
//!   │   └── OllamaClient (opcional, --no-llm desliga)
//!   ├── Processa o diretório (sequencial ou --parallel)
//!   ├── Ordena por data (ausentes por último)
//!   └── Imprime tabela + estatísticas de depuração
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Processar um diretório de atas com logs padrão (info)
//! cargo run -- ./atas
//!
//! # Sem o estágio de LLM, com logs detalhados
//! RUST_LOG=debug cargo run -- ./atas --no-llm
//!
//! # Apontando para outra instância Ollama
//! cargo run -- ./atas --llm-url http://localhost:11434 --model qwen3:8b
//! ```

// Declaração dos módulos da aplicação.
// Cada módulo corresponde a uma camada da arquitetura:

/// Módulo `core` — tipos fundamentais: CanonicalDate, FileMetadata, AtaRecord.
mod core;

/// Módulo `extract` — pipeline de extração de datas em três estágios.
mod extract;

/// Módulo `pdf` — extração e normalização de texto de PDF.
mod pdf;

/// Módulo `batch` — varredura do diretório e processamento do lote.
mod batch;

/// Módulo `report` — ordenação, tabela de resultados e depuração de datas.
mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::batch::AtaProcessor;
use crate::extract::llm::{OllamaClient, RemoteDateStage, MODELO_PADRAO, URL_PADRAO};
use crate::extract::DateExtractor;

/// Extrai datas e metadados de atas de reunião de CBHs em PDF.
#[derive(Parser)]
#[command(name = "cbh-atas", version)]
struct Cli {
    /// Diretório contendo os arquivos Ata_CBH_*.pdf
    diretorio: PathBuf,

    /// Desliga o estágio de inferência remota (LLM)
    #[arg(long)]
    no_llm: bool,

    /// URL base do serviço Ollama
    #[arg(long, default_value = URL_PADRAO)]
    llm_url: String,

    /// Modelo Ollama usado na inferência de datas
    #[arg(long, default_value = MODELO_PADRAO)]
    model: String,

    /// Processa os documentos em paralelo
    #[arg(long)]
    parallel: bool,
}

/// Função principal da ferramenta.
///
/// # Erros
///
/// Retorna erro apenas quando o diretório não pode ser listado —
/// problemas em documentos individuais são diagnósticos, nunca abortam
/// o lote.
fn main() -> Result<()> {
    // Configura o sistema de logging/tracing.
    // Aceita a variável de ambiente RUST_LOG para configurar o nível.
    // Exemplo: RUST_LOG=debug cargo run -- ./atas
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Estágio remoto é opcional — sem ele, o pipeline para na cascata léxica
    let remote = if cli.no_llm {
        tracing::info!("Estágio de LLM desabilitado (--no-llm)");
        None
    } else {
        tracing::info!(url = %cli.llm_url, model = %cli.model, "Estágio de LLM habilitado");
        Some(RemoteDateStage::new(Box::new(OllamaClient::new(
            &cli.llm_url,
            &cli.model,
        ))))
    };

    let extractor = DateExtractor::new(remote);
    let processor = AtaProcessor::new(cli.diretorio, extractor, cli.parallel);

    let mut registros = processor.processar_todos()?;
    report::ordenar_por_data(&mut registros);

    report::imprimir_tabela(&registros);
    report::depurar_datas(&registros);

    Ok(())
}
