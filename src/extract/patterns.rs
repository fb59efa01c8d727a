//! # Pattern Date Matcher — Gramáticas Regex de Data
//!
//! Primeira estratégia do pipeline: procura substrings em forma de data
//! nos **primeiros 2000 caracteres** do texto (case-folded), usando cinco
//! gramáticas em **ordem de prioridade declarada**:
//!
//! | Prioridade | Gramática | Exemplo |
//! |-----------|-----------|---------|
//! | 1 | `D de MÊS de AAAA` | "15 de março de 2021" |
//! | 2 | `D/M/AAAA` | "15/04/2021" |
//! | 3 | `D-M-AAAA` | "07-08-2019" |
//! | 4 | `AAAA-M-D` | "2021-03-12" |
//! | 5 | `dia D de MÊS de AAAA` | "dia 3 de outubro de 2020" |
//!
//! Para cada gramática são coletados **todos** os matches, em ordem de
//! texto; o primeiro que validar contra o calendário real vence. Datas
//! malformadas ("32/01/2021", "30 de fevereiro...") são descartadas e a
//! varredura continua. Nenhum match válido → ausência, que é o desfecho
//! comum que aciona o próximo estágio do pipeline.

use regex::Regex;

use crate::core::date::{mes_para_numero, CanonicalDate};

/// Janela de busca: só os primeiros 2000 caracteres interessam — a data
/// da reunião aparece no cabeçalho ou na frase de abertura da ata.
const JANELA_BUSCA: usize = 2000;

/// Ordem dos grupos de captura de uma gramática.
///
/// Quase todas capturam `(dia, mês, ano)`; a gramática ISO captura
/// `(ano, mês, dia)` e precisa resolver os grupos na ordem certa.
#[derive(Clone, Copy)]
enum OrdemGrupos {
    DiaMesAno,
    AnoMesDia,
}

/// Uma gramática de data: regex compilada + ordem dos grupos.
struct Gramatica {
    re: Regex,
    ordem: OrdemGrupos,
}

/// Casador de padrões de data sobre o início do texto da ata.
///
/// As cinco regexes são compiladas uma única vez na construção e
/// reutilizadas para todos os documentos do lote.
pub struct PatternMatcher {
    gramaticas: Vec<Gramatica>,
}

impl PatternMatcher {
    /// Cria o casador com as cinco gramáticas na ordem de prioridade.
    pub fn new() -> Self {
        // A ordem de declaração É a ordem de prioridade da busca.
        let gramaticas = vec![
            Gramatica {
                re: Regex::new(r"(\d{1,2})\s*de\s*([a-zç]+)\s*de\s*(\d{4})")
                    .expect("invalid regex"),
                ordem: OrdemGrupos::DiaMesAno,
            },
            Gramatica {
                re: Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").expect("invalid regex"),
                ordem: OrdemGrupos::DiaMesAno,
            },
            Gramatica {
                re: Regex::new(r"(\d{1,2})-(\d{1,2})-(\d{4})").expect("invalid regex"),
                ordem: OrdemGrupos::DiaMesAno,
            },
            Gramatica {
                re: Regex::new(r"(\d{4})-(\d{1,2})-(\d{1,2})").expect("invalid regex"),
                ordem: OrdemGrupos::AnoMesDia,
            },
            Gramatica {
                re: Regex::new(r"dia\s*(\d{1,2})\s*de\s*([a-zç]+)\s*de\s*(\d{4})")
                    .expect("invalid regex"),
                ordem: OrdemGrupos::DiaMesAno,
            },
        ];
        Self { gramaticas }
    }

    /// Busca a primeira data válida no início do texto.
    ///
    /// ## Ordem de Busca
    ///
    /// Gramáticas na ordem declarada; dentro de cada gramática, matches
    /// em ordem de texto. O primeiro candidato que passar na validação
    /// de calendário é retornado como `YYYY-MM-DD`.
    ///
    /// # Retorno
    ///
    /// `None` quando nenhuma gramática produz data válida — ausência,
    /// não erro.
    pub fn buscar(&self, texto: &str) -> Option<CanonicalDate> {
        // Case-fold antes do corte, espelhando a janela sobre o texto já minúsculo
        let janela: String = texto.to_lowercase().chars().take(JANELA_BUSCA).collect();

        for gramatica in &self.gramaticas {
            for caps in gramatica.re.captures_iter(&janela) {
                let (ano, mes, dia) = match gramatica.ordem {
                    OrdemGrupos::DiaMesAno => (&caps[3], &caps[2], &caps[1]),
                    OrdemGrupos::AnoMesDia => (&caps[1], &caps[2], &caps[3]),
                };
                if let Some(data) = montar_data(ano, mes, dia) {
                    return Some(data);
                }
            }
        }
        None
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Monta uma candidata a partir dos grupos capturados e valida.
///
/// O mês pode vir numérico ("04") ou por extenso ("abril"/"marco");
/// a resolução numérica é tentada primeiro, depois a tabela de meses.
fn montar_data(ano: &str, mes: &str, dia: &str) -> Option<CanonicalDate> {
    let ano: i32 = ano.parse().ok()?;
    let dia: u32 = dia.parse().ok()?;
    let mes: u32 = mes.parse().ok().or_else(|| mes_para_numero(mes))?;
    CanonicalDate::from_ymd(ano, mes, dia)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buscar(texto: &str) -> Option<String> {
        PatternMatcher::new().buscar(texto).map(|d| d.to_string())
    }

    // ─── as cinco gramáticas ───────────────────────────────────

    #[test]
    fn mes_por_extenso() {
        let texto = "Reunião realizada em 15 de março de 2021 na sede do comitê.";
        assert_eq!(buscar(texto).as_deref(), Some("2021-03-15"));
    }

    #[test]
    fn marco_sem_cedilha() {
        assert_eq!(buscar("ata de 12 de marco de 2020").as_deref(), Some("2020-03-12"));
    }

    #[test]
    fn formato_com_barras() {
        assert_eq!(buscar("Data: 15/04/2021.").as_deref(), Some("2021-04-15"));
    }

    #[test]
    fn formato_com_hifens() {
        assert_eq!(buscar("Em 07-08-2019 reuniram-se...").as_deref(), Some("2019-08-07"));
    }

    #[test]
    fn formato_iso_resolve_grupos_na_ordem_certa() {
        assert_eq!(buscar("registro 2021-03-12 arquivado").as_deref(), Some("2021-03-12"));
    }

    #[test]
    fn prefixo_dia() {
        let texto = "No dia 3 de outubro de 2020 o plenário decidiu...";
        assert_eq!(buscar(texto).as_deref(), Some("2020-10-03"));
    }

    // ─── prioridade e ordem ────────────────────────────────────

    #[test]
    fn gramatica_declarada_primeiro_vence() {
        // ISO aparece antes no texto, mas "D de MÊS de AAAA" tem prioridade
        let texto = "2020-01-01 e depois 15 de abril de 2021";
        assert_eq!(buscar(texto).as_deref(), Some("2021-04-15"));
    }

    #[test]
    fn dentro_da_gramatica_vence_o_primeiro_no_texto() {
        let texto = "assinada em 01/02/2021, retificada em 03/04/2021";
        assert_eq!(buscar(texto).as_deref(), Some("2021-02-01"));
    }

    #[test]
    fn match_invalido_nao_bloqueia_o_proximo() {
        // 32/01 falha na validação; a varredura segue até 10/02
        let texto = "protocolo 32/01/2021 e reunião em 10/02/2021";
        assert_eq!(buscar(texto).as_deref(), Some("2021-02-10"));
    }

    // ─── validação de calendário ───────────────────────────────

    #[test]
    fn dia_32_sinaliza_ausencia() {
        assert_eq!(buscar("em 32/01/2021"), None);
    }

    #[test]
    fn mes_13_sinaliza_ausencia() {
        assert_eq!(buscar("em 05-13-2021"), None);
    }

    #[test]
    fn fevereiro_30_sinaliza_ausencia() {
        assert_eq!(buscar("aos 30 de fevereiro de 2021"), None);
    }

    #[test]
    fn mes_nao_reconhecido_sinaliza_ausencia() {
        assert_eq!(buscar("aos 12 de floreal de 2021"), None);
    }

    // ─── janela e case-folding ─────────────────────────────────

    #[test]
    fn data_fora_da_janela_de_2000_chars_e_ignorada() {
        let mut texto = "x".repeat(2100);
        texto.push_str(" 15/04/2021");
        assert_eq!(buscar(&texto), None);
    }

    #[test]
    fn data_dentro_da_janela_e_encontrada() {
        let mut texto = "x".repeat(1900);
        texto.push_str(" 15/04/2021");
        assert_eq!(buscar(&texto).as_deref(), Some("2021-04-15"));
    }

    #[test]
    fn maiusculas_sao_normalizadas() {
        assert_eq!(buscar("15 DE MARÇO DE 2021").as_deref(), Some("2021-03-15"));
    }

    #[test]
    fn dia_e_mes_ganham_zero_a_esquerda() {
        assert_eq!(buscar("5 de maio de 2021").as_deref(), Some("2021-05-05"));
    }

    #[test]
    fn texto_sem_data_sinaliza_ausencia() {
        assert_eq!(buscar("ata sem qualquer data mencionada"), None);
    }
}
