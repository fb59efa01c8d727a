//! # AtaRecord — O Registro Estruturado de uma Ata
//!
//! Resultado final do processamento de um documento: os metadados do
//! arquivo, a data extraída (ou ausente) e o texto bruto. Imutável após
//! a criação — nenhuma entidade sobrevive além do processamento do
//! documento que a produziu.
//!
//! A serialização segue o formato de tabela do consumidor:
//! `{ID, Data, CBH, Tipo, Texto}`, com `Data` nula quando as três
//! estratégias de extração sinalizaram ausência.

use serde::Serialize;

use super::date::CanonicalDate;

/// Registro estruturado de uma ata processada.
///
/// Uma ata com data ausente **continua no resultado** — ausência de data
/// é um desfecho legítimo (caso "Date-not-found"), diferente de um
/// documento improcessável, que nem gera registro.
#[derive(Debug, Clone, Serialize)]
pub struct AtaRecord {
    /// Identificador do documento — o próprio nome do arquivo.
    #[serde(rename = "ID")]
    pub id: String,
    /// Data da reunião extraída do corpo do texto, se encontrada.
    #[serde(rename = "Data")]
    pub data: Option<CanonicalDate>,
    /// Nome completo do Comitê de Bacia (ou o código, se desconhecido).
    #[serde(rename = "CBH")]
    pub cbh: String,
    /// Tipo de reunião em lowercase (ex: "ordinaria").
    #[serde(rename = "Tipo")]
    pub tipo: String,
    /// Texto integral extraído do PDF, já normalizado.
    #[serde(rename = "Texto")]
    pub texto: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializa_com_cabecalhos_da_tabela() {
        let registro = AtaRecord {
            id: "Ata_CBH_LN_2022_05_Ordinaria.pdf".into(),
            data: CanonicalDate::from_ymd(2022, 5, 10),
            cbh: "Litoral Norte".into(),
            tipo: "ordinaria".into(),
            texto: "Aos dez dias...".into(),
        };
        let json = serde_json::to_value(&registro).unwrap();
        assert_eq!(json["ID"], "Ata_CBH_LN_2022_05_Ordinaria.pdf");
        assert_eq!(json["Data"], "2022-05-10");
        assert_eq!(json["CBH"], "Litoral Norte");
        assert_eq!(json["Tipo"], "ordinaria");
    }

    #[test]
    fn data_ausente_serializa_como_null() {
        let registro = AtaRecord {
            id: "Ata_CBH_PA_2020_01_Ordinaria.pdf".into(),
            data: None,
            cbh: "Piranhas".into(),
            tipo: "ordinaria".into(),
            texto: String::new(),
        };
        let json = serde_json::to_value(&registro).unwrap();
        assert!(json["Data"].is_null());
    }
}
