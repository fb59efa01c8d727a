//! # Relatório — Tabela de Resultados e Depuração de Datas
//!
//! Apresentação do lote processado: ordenação por data, tabela resumida
//! no stdout e estatísticas de depuração das datas (total, nulas,
//! arquivos problemáticos, período coberto).
//!
//! A coluna `Texto` aparece na tabela apenas como contagem de
//! caracteres — o texto integral vive no registro, não no terminal.

use crate::core::AtaRecord;

/// Ordena os registros por data ascendente, com datas ausentes por último.
///
/// A ordenação é estável: empates (mesma data, ou ambas ausentes)
/// preservam a ordem de processamento.
pub fn ordenar_por_data(registros: &mut [AtaRecord]) {
    registros.sort_by_key(|r| match r.data {
        Some(data) => (0, Some(data)),
        None => (1, None),
    });
}

/// Imprime a tabela `{ID, Data, CBH, Tipo, Texto}` no stdout.
pub fn imprimir_tabela(registros: &[AtaRecord]) {
    println!(
        "{:<42} {:<12} {:<16} {:<16} {:>10}",
        "ID", "Data", "CBH", "Tipo", "Texto"
    );
    for registro in registros {
        let data = registro
            .data
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<42} {:<12} {:<16} {:<16} {:>9}c",
            registro.id,
            data,
            registro.cbh,
            registro.tipo,
            registro.texto.chars().count()
        );
    }
}

/// Imprime as estatísticas de depuração das datas extraídas.
///
/// Espelha o que um analista verifica primeiro: quantos registros, quantas
/// datas ficaram nulas, quais arquivos falharam e o período coberto.
pub fn depurar_datas(registros: &[AtaRecord]) {
    let nulas = registros.iter().filter(|r| r.data.is_none()).count();

    println!("\n=== DEBUG DE DATAS ===");
    println!("Total de registros: {}", registros.len());
    println!("Datas nulas: {}", nulas);

    if nulas > 0 {
        println!("\nArquivos com problemas de data:");
        for registro in registros.iter().filter(|r| r.data.is_none()) {
            println!("- {}", registro.id);
        }
    }

    let validas: Vec<_> = registros.iter().filter_map(|r| r.data).collect();
    if let (Some(inicio), Some(fim)) = (validas.iter().min(), validas.iter().max()) {
        println!("\nDatas válidas: {}", validas.len());
        println!("Período: {} até {}", inicio, fim);
    }
}
