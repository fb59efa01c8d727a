//! # Pipeline de Extração de Datas — Fallback em Três Estágios
//!
//! Este módulo orquestra a extração da data da reunião a partir do texto
//! livre da ata. O [`DateExtractor`] é o componente central que compõe as
//! três estratégias em uma cadeia de curto-circuito com **prioridade
//! estrita**:
//!
//! ```text
//! Texto da ata
//!   ├── 1. PatternMatcher — 5 gramáticas regex nos primeiros 2000 chars
//!   │   → Se data válida: retorna imediatamente
//!   ├── 2. LexicalDecoder — cascata de substituições "Aos ... ,"
//!   │   → Se data válida: retorna imediatamente
//!   └── 3. RemoteDateStage — LLM local (se habilitada na configuração)
//!       → Recebe só as primeiras 500 palavras do texto
//! ```
//!
//! Ausência é um desfecho legítimo do pipeline inteiro: o documento entra
//! no resultado com data nula. Nenhum erro de estágio escapa ao chamador,
//! e não há estado mutável entre chamadas — rodar duas vezes sobre o
//! mesmo texto produz o mesmo resultado.
//!
//! ## Sub-módulos
//!
//! | Módulo | Responsabilidade |
//! |--------|-----------------|
//! | [`patterns`] | gramáticas regex de data em ordem de prioridade |
//! | [`lexical`] | decodificador de datas por extenso (7 tabelas) |
//! | [`llm`] | cliente de inferência remota (Ollama) e seu contrato |

/// Sub-módulo do casador de padrões regex de data.
pub mod patterns;

/// Sub-módulo do decodificador léxico de datas por extenso.
pub mod lexical;

/// Sub-módulo do cliente de inferência remota de datas.
pub mod llm;

use crate::core::CanonicalDate;

use lexical::LexicalDecoder;
use llm::RemoteDateStage;
use patterns::PatternMatcher;

/// Limite de palavras enviadas ao estágio remoto.
const PALAVRAS_LLM: usize = 500;

/// Orquestrador do pipeline de extração de datas.
///
/// Os dois primeiros estágios são puros e sempre presentes; o estágio
/// remoto é opcional (configuração) por depender de um serviço externo.
pub struct DateExtractor {
    patterns: PatternMatcher,
    lexical: LexicalDecoder,
    remote: Option<RemoteDateStage>,
}

impl DateExtractor {
    /// Cria o pipeline; `remote = None` desabilita o terceiro estágio.
    pub fn new(remote: Option<RemoteDateStage>) -> Self {
        Self {
            patterns: PatternMatcher::new(),
            lexical: LexicalDecoder::new(),
            remote,
        }
    }

    /// Extrai a data da reunião do texto da ata.
    ///
    /// Estágios em prioridade estrita — o primeiro resultado validado
    /// vence, mesmo que um estágio posterior encontrasse data diferente.
    /// O nome do arquivo serve apenas para diagnóstico.
    ///
    /// # Retorno
    ///
    /// `None` quando os três estágios sinalizam ausência — desfecho
    /// esperado, não erro.
    pub fn extract(&self, texto: &str, arquivo: &str) -> Option<CanonicalDate> {
        if let Some(data) = self.patterns.buscar(texto) {
            return Some(data);
        }

        if let Some(data) = self.lexical.decodificar(texto) {
            return Some(data);
        }

        if let Some(remote) = &self.remote {
            tracing::info!(arquivo, "Usando LLM para extrair data");
            let trecho = primeiras_palavras(texto, PALAVRAS_LLM);
            return remote.extrair(&trecho);
        }

        None
    }
}

/// Recorta as primeiras `n` palavras do texto (separadas por whitespace).
fn primeiras_palavras(texto: &str, n: usize) -> String {
    texto.split_whitespace().take(n).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::llm::MockLlmClient;
    use super::*;

    fn sem_llm() -> DateExtractor {
        DateExtractor::new(None)
    }

    fn com_llm(resposta: &str) -> DateExtractor {
        DateExtractor::new(Some(RemoteDateStage::new(Box::new(
            MockLlmClient::respondendo(resposta),
        ))))
    }

    // ─── prioridade estrita dos estágios ───────────────────────

    #[test]
    fn padrao_vence_o_decodificador_lexical() {
        // O texto tem data casável por regex E frase "Aos ..." com data
        // diferente; a prioridade do primeiro estágio é estrita
        let texto = "Reunião de 10/05/2021. Aos vinte e cinco dias do mês de março \
                     de dois mil e vinte e um, reuniram-se os membros.";
        let data = sem_llm().extract(texto, "ata.pdf").unwrap();
        assert_eq!(data.to_string(), "2021-05-10");
    }

    #[test]
    fn lexical_assume_quando_nao_ha_padrao() {
        let texto = "Aos vinte e cinco dias do mês de março de dois mil e vinte e um, \
                     reuniram-se os membros.";
        let data = sem_llm().extract(texto, "ata.pdf").unwrap();
        assert_eq!(data.to_string(), "2021-03-25");
    }

    #[test]
    fn llm_assume_quando_os_dois_primeiros_falham() {
        let extractor = com_llm(r#"{"data": "2022-05-10"}"#);
        let data = extractor.extract("ata sem data reconhecível", "ata.pdf").unwrap();
        assert_eq!(data.to_string(), "2022-05-10");
    }

    #[test]
    fn llm_desabilitada_sinaliza_ausencia() {
        assert!(sem_llm().extract("ata sem data reconhecível", "ata.pdf").is_none());
    }

    #[test]
    fn llm_nao_e_consultada_quando_um_estagio_anterior_acerta() {
        // Resposta do mock propositalmente diferente: se a LLM fosse
        // consultada, o resultado mudaria
        let extractor = com_llm(r#"{"data": "1999-01-01"}"#);
        let data = extractor.extract("reunião em 15/04/2021", "ata.pdf").unwrap();
        assert_eq!(data.to_string(), "2021-04-15");
    }

    #[test]
    fn ausencia_em_todos_os_estagios() {
        let extractor = com_llm(r#"{"data": null}"#);
        assert!(extractor.extract("ata sem data reconhecível", "ata.pdf").is_none());
    }

    // ─── idempotência ──────────────────────────────────────────

    #[test]
    fn reexecucao_sobre_o_mesmo_texto_e_identica() {
        let extractor = sem_llm();
        let texto = "Aos dezessete dias do mês de março do ano de dois mil e vinte e um, ...";
        let primeira = extractor.extract(texto, "ata.pdf");
        let segunda = extractor.extract(texto, "ata.pdf");
        assert_eq!(primeira, segunda);
        assert_eq!(primeira.unwrap().to_string(), "2021-03-17");
    }

    // ─── recorte para a LLM ────────────────────────────────────

    #[test]
    fn primeiras_palavras_respeita_o_limite() {
        let texto = "a b c d e";
        assert_eq!(primeiras_palavras(texto, 3), "a b c");
        assert_eq!(primeiras_palavras(texto, 10), "a b c d e");
    }

    #[test]
    fn primeiras_palavras_normaliza_whitespace() {
        assert_eq!(primeiras_palavras("  a\n\nb\tc  ", 5), "a b c");
    }
}
