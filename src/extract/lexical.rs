//! # Lexical Date Decoder — Datas por Extenso em Português
//!
//! Segunda estratégia do pipeline: recupera datas do padrão idiomático de
//! abertura de atas — "**Aos** vinte e cinco dias do mês de março de dois
//! mil e vinte e um**,**" — que nenhuma gramática regex de data alcança.
//!
//! ## Algoritmo
//!
//! ```text
//! 1. Captura o trecho entre "Aos" e a primeira vírgula
//!    (fallback: "Ao ... ,")
//! 2. Lowercase do trecho capturado
//! 3. Cascata de 7 tabelas de substituição literal, em ordem fixa
//! 4. Busca D-M-AAAA (depois AAAA-M-D) nos tokens resultantes
//! 5. Validação de calendário → YYYY-MM-DD ou ausência
//! ```
//!
//! ## Por que a Ordem das Tabelas é Fixa
//!
//! A substituição é **literal**, não tokenizada — frases que compartilham
//! prefixo se corrompem se a mais curta for aplicada primeiro ("vinte e
//! cinco dias" contém "vinte", que a tabela de anos converte em "20").
//! A ordem das tabelas, e das chaves dentro de cada tabela, é parte do
//! algoritmo — inclusive entradas aparentemente redundantes. Reordenar
//! muda o resultado silenciosamente; o corpus de atas é o teste de
//! regressão.
//!
//! Vocabulário fechado, enumerado à mão: frases fora das tabelas
//! atravessam a cascata intactas e reprovam na validação final — ausência
//! esperada, que aciona o próximo estágio, nunca um erro.

use regex::Regex;

use crate::core::date::CanonicalDate;

/// Tabela 1 — dias de 16 a 31 (as formas com "vinte"/"trinta").
///
/// Aplicada antes da tabela de dias simples e muito antes da tabela de
/// anos: "vinte e cinco dias" precisa sumir antes que o "vinte" solto
/// dos anos seja tocado.
const DIAS_VINTE: &[(&str, &str)] = &[
    ("dezesseis dias ", "16-"),
    ("dezessete dias ", "17-"),
    ("dezoito dias ", "18-"),
    ("dezenove dias ", "19-"),
    ("vinte dias ", "20-"),
    ("vinte e um dias ", "21-"),
    ("vinte um dias", "21-"),
    ("vinte e dois dias ", "22-"),
    ("vinte e três dias ", "23-"),
    ("vinte três dias ", "23-"),
    ("vinte e quatro dias ", "24-"),
    ("vinte quatro dias ", "24-"),
    ("vinte e cinco dias ", "25-"),
    ("vinte cinco ", "25-"),
    ("vinte e seis dias ", "26-"),
    ("vinte e sete dias ", "27-"),
    ("vinte sete", "27-"),
    ("vinte e oito dias ", "28-"),
    ("vinte e nove dias ", "29-"),
    ("trinta dias ", "30-"),
    ("trinta e um dias ", "31-"),
];

/// Tabela 2 — dias de 1 a 15 (inclui grafias erradas reais do corpus:
/// "quartoze", "Catorze").
const DIAS: &[(&str, &str)] = &[
    ("um dias ", "1-"),
    ("primeiro dia ", "1-"),
    ("dois dias ", "2-"),
    ("três dias ", "3-"),
    ("quatro dias ", "4-"),
    ("cinco dias ", "5-"),
    ("seis dias ", "6-"),
    ("sete dias ", "7-"),
    ("oito dias ", "8-"),
    ("nove dias ", "9-"),
    ("dez dias ", "10-"),
    ("onze dias ", "11-"),
    ("doze dias ", "12-"),
    ("treze dias ", "13-"),
    ("quatorze dias ", "14-"),
    ("quartoze dias ", "14-"),
    ("catorze dias ", "14-"),
    ("Catorze dias ", "14-"),
    ("quinze dias ", "15-"),
    ("trinta dias ", "30-"),
];

/// Tabela 3 — meses precedidos de "do mês de".
const MESES_EXTENSO: &[(&str, &str)] = &[
    ("do mês de janeiro ", "01-"),
    ("do mês de fevereiro ", "02-"),
    ("do mês de março", "03-"),
    ("do mês de abril ", "04-"),
    ("do mês de maio ", "05-"),
    ("do mês de junho ", "06-"),
    ("do mês de julho ", "07-"),
    ("do mês de agosto ", "08-"),
    ("do mês de setembro ", "09-"),
    ("do mês de outubro ", "10-"),
    ("do mês de novembro ", "11-"),
    ("do mês de dezembro ", "12-"),
];

/// Tabela 4 — formas especiais de ano com o prefixo "do ano".
const ANOS_ESPECIAIS: &[(&str, &str)] = &[
    ("do ano dois mil e dez", "2010"),
    ("do ano de dois mil e ", "20"),
    ("do ano de 2021", "2021"),
    ("do ano de 2020", "2020"),
    ("do ano dois mil e ", "20"),
];

/// Tabela 5 — milhar do ano sem o prefixo "do ano".
const ANOS_MILHAR: &[(&str, &str)] = &[("de dois mil e ", "20")];

/// Tabela 6 — dezenas finais do ano (11 a 22).
const ANOS_DEZENA: &[(&str, &str)] = &[
    ("onze", "11"),
    ("doze", "12"),
    ("treze", "13"),
    ("quatorze", "14"),
    ("catorze", "14"),
    ("quinze", "15"),
    ("dezesseis", "16"),
    ("dezessete", "17"),
    ("dezoito", "18"),
    ("dezenove", "19"),
    ("vinte um", "21"),
    ("vinte e um", "21"),
    ("vinte dois", "22"),
    ("vinte e dois", "22"),
];

/// Tabela 7 — unidades finais do ano e o "vinte" da década.
const ANOS_FINAL: &[(&str, &str)] = &[
    ("vinte", "20"),
    ("um", "01"),
    ("dois", "02"),
    ("três", "03"),
    ("quatro", "04"),
    ("cinco", "05"),
    ("seis", "06"),
    ("sete", "07"),
    ("oito", "08"),
    ("nove", "09"),
    ("dez", "10"),
];

/// A cascata completa: as sete tabelas na ordem fixa de aplicação.
const CASCATA: &[&[(&str, &str)]] = &[
    DIAS_VINTE,
    DIAS,
    MESES_EXTENSO,
    ANOS_ESPECIAIS,
    ANOS_MILHAR,
    ANOS_DEZENA,
    ANOS_FINAL,
];

/// Aplica a cascata de substituições literais sobre um trecho.
///
/// Cada tabela é esgotada (todas as chaves, na ordem declarada) antes da
/// próxima. Substituição por substring literal — sem regex, sem tokens.
fn aplicar_cascata(trecho: &str) -> String {
    let mut atual = trecho.to_string();
    for tabela in CASCATA {
        for (frase, valor) in *tabela {
            if atual.contains(frase) {
                atual = atual.replace(frase, valor);
            }
        }
    }
    atual
}

/// Decodificador léxico de datas por extenso.
///
/// Regexes de captura e de busca final compiladas uma única vez.
pub struct LexicalDecoder {
    re_aos: Regex,
    re_ao: Regex,
    re_dma: Regex,
    re_amd: Regex,
}

impl LexicalDecoder {
    /// Cria o decodificador com as regexes compiladas.
    pub fn new() -> Self {
        Self {
            re_aos: Regex::new(r"(?i)Aos\s*(.*?)\s*,").expect("invalid regex"),
            re_ao: Regex::new(r"(?i)Ao\s*(.*?)\s*,").expect("invalid regex"),
            // A cascata deixa espaços residuais entre os tokens numéricos
            // ("17-03- 2021"); a busca final tolera espaço junto aos hifens.
            re_dma: Regex::new(r"(\d{1,2})\s*-\s*(\d{1,2})\s*-\s*(\d{4})")
                .expect("invalid regex"),
            re_amd: Regex::new(r"(\d{4})\s*-\s*(\d{1,2})\s*-\s*(\d{1,2})")
                .expect("invalid regex"),
        }
    }

    /// Decodifica a data por extenso da frase de abertura da ata.
    ///
    /// ## Etapas
    ///
    /// 1. Captura `Aos ... ,` (primeira ocorrência, case-insensitive);
    ///    sem match, tenta `Ao ... ,`
    /// 2. Lowercase do trecho
    /// 3. [`aplicar_cascata`] — sete tabelas em ordem fixa
    /// 4. Busca `D-M-AAAA` e depois `AAAA-M-D` no resultado
    /// 5. Validação de calendário
    ///
    /// # Retorno
    ///
    /// `None` para texto sem a frase de abertura, vocabulário fora das
    /// tabelas, ou data que reprova no calendário — sempre ausência,
    /// nunca erro.
    pub fn decodificar(&self, texto: &str) -> Option<CanonicalDate> {
        let caps = self
            .re_aos
            .captures(texto)
            .or_else(|| self.re_ao.captures(texto))?;

        let trecho = caps.get(1)?.as_str().to_lowercase();
        let decodificado = aplicar_cascata(&trecho);

        // Dia-mês-ano primeiro, depois ano-mês-dia
        if let Some(c) = self.re_dma.captures(&decodificado) {
            let (dia, mes, ano) = (&c[1], &c[2], &c[3]);
            if let Some(data) = montar(ano, mes, dia) {
                return Some(data);
            }
        }
        if let Some(c) = self.re_amd.captures(&decodificado) {
            let (ano, mes, dia) = (&c[1], &c[2], &c[3]);
            if let Some(data) = montar(ano, mes, dia) {
                return Some(data);
            }
        }
        None
    }
}

impl Default for LexicalDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn montar(ano: &str, mes: &str, dia: &str) -> Option<CanonicalDate> {
    CanonicalDate::from_ymd(ano.parse().ok()?, mes.parse().ok()?, dia.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decodificar(texto: &str) -> Option<String> {
        LexicalDecoder::new().decodificar(texto).map(|d| d.to_string())
    }

    // ─── cascata de substituição ───────────────────────────────

    #[test]
    fn cascata_reduz_a_frase_de_referencia_a_tokens_numericos() {
        let saida =
            aplicar_cascata("dezessete dias do mês de março do ano de dois mil e vinte e um");
        assert_eq!(saida, "17-03- 2021");
    }

    #[test]
    fn cascata_preserva_vocabulario_desconhecido() {
        assert_eq!(aplicar_cascata("sessão solene"), "sessão solene");
    }

    #[test]
    fn dia_composto_e_consumido_antes_do_vinte_do_ano() {
        // "vinte e cinco dias" sai na tabela 1; só o "vinte e um" do ano
        // sobra para as tabelas de ano
        let saida =
            aplicar_cascata("vinte e cinco dias do mês de março de dois mil e vinte e um");
        assert_eq!(saida, "25-03- 2021");
    }

    // ─── decodificação completa ────────────────────────────────

    #[test]
    fn frase_de_referencia_do_corpus() {
        let texto = "Aos dezessete dias do mês de março do ano de dois mil e vinte e um, \
                     reuniram-se os membros do comitê.";
        assert_eq!(decodificar(texto).as_deref(), Some("2021-03-17"));
    }

    #[test]
    fn dia_vinte_e_cinco_sem_o_prefixo_do_ano() {
        let texto = "Aos vinte e cinco dias do mês de março de dois mil e vinte e um, às 14h.";
        assert_eq!(decodificar(texto).as_deref(), Some("2021-03-25"));
    }

    #[test]
    fn fallback_para_ao_singular() {
        let texto = "Ao primeiro dia do mês de junho de dois mil e vinte, o plenário...";
        assert_eq!(decodificar(texto).as_deref(), Some("2020-06-01"));
    }

    #[test]
    fn ano_com_dezena_por_extenso() {
        let texto = "Aos cinco dias do mês de maio do ano de dois mil e dezessete, em João Pessoa.";
        assert_eq!(decodificar(texto).as_deref(), Some("2017-05-05"));
    }

    #[test]
    fn captura_e_case_insensitive() {
        let texto = "AOS dez dias do mês de agosto de dois mil e vinte e dois, compareceram.";
        assert_eq!(decodificar(texto).as_deref(), Some("2022-08-10"));
    }

    // ─── ausência ──────────────────────────────────────────────

    #[test]
    fn sem_frase_de_abertura_sinaliza_ausencia() {
        assert_eq!(decodificar("A reunião ocorreu conforme previsto."), None);
    }

    #[test]
    fn vocabulario_fora_das_tabelas_sinaliza_ausencia() {
        assert_eq!(decodificar("Aos interessados presentes, bom dia."), None);
    }

    #[test]
    fn data_invalida_apos_substituicao_sinaliza_ausencia() {
        // "trinta dias ... fevereiro" decodifica para 30-02, que reprova
        let texto = "Aos trinta dias do mês de fevereiro do ano de dois mil e vinte, nada consta.";
        assert_eq!(decodificar(texto), None);
    }

    #[test]
    fn trecho_sem_virgula_sinaliza_ausencia() {
        assert_eq!(
            decodificar("Aos dezessete dias do mês de março de dois mil e vinte e um"),
            None
        );
    }
}
