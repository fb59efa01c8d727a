//! # Remote Date Inference Client — Último Recurso via Ollama
//!
//! Terceira e última estratégia do pipeline: quando regex e decodificação
//! léxica falham, um trecho da ata é enviado a um modelo de linguagem
//! local (Ollama) com uma instrução que exige resposta em JSON estrito:
//! `{"data": "YYYY-MM-DD"}` ou `{"data": null}`.
//!
//! ## Contrato de Wire
//!
//! `POST {base}/api/generate` com corpo
//! `{model, prompt, stream: false, options: {temperature: 0.1, top_p: 0.9,
//! num_predict: 5000}}`; resposta JSON com o campo `response` contendo o
//! texto bruto do modelo. Chamada bloqueante com timeout fixo de 60 s.
//!
//! ## Tratamento da Resposta (em ordem)
//!
//! ```text
//! 1. Transporte/status fora de 2xx → ausência (+ diagnóstico distinto
//!    quando o serviço parece fora do ar)
//! 2. Remove caracteres de controle do texto retornado
//! 3. Localiza o primeiro objeto JSON por span guloso { ... } e interpreta
//! 4. Campo "data" presente e não-nulo → parse multi-formato
//!    (ISO, D/M/AAAA, D-M-AAAA, D de <mês> de AAAA, D de <abrev> de AAAA)
//! 5. JSON ilegível → varredura por substring AAAA-MM-DD na resposta crua
//! 6. Qualquer falha em qualquer etapa → ausência, nunca erro ao chamador
//! ```
//!
//! O cliente HTTP fica atrás do trait [`LlmClient`], permitindo que os
//! testes do pipeline usem um mock em vez de um serviço vivo.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::date::{mes_abreviado_para_numero, mes_para_numero, CanonicalDate};

/// Timeout fixo da chamada bloqueante, em segundos.
const TIMEOUT_SEGUNDOS: u64 = 60;

/// Modelo padrão usado na inferência de datas.
pub const MODELO_PADRAO: &str = "qwen3:8b";

/// Endpoint padrão da instância Ollama local.
pub const URL_PADRAO: &str = "http://localhost:11434";

/// Erros do cliente de inferência remota.
///
/// A indisponibilidade de transporte é distinguida das demais falhas
/// para que o diagnóstico sugira iniciar o serviço local; para o fluxo
/// de controle, todas degradam igualmente para ausência.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("Ollama não está acessível em {0}")]
    Connection(String),

    #[error("requisição excedeu o tempo limite de {0}s")]
    Timeout(u64),

    #[error("Ollama retornou erro (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("falha ao interpretar a resposta do Ollama: {0}")]
    ResponseParsing(String),
}

/// Interface do serviço de geração de texto.
///
/// O pipeline só depende deste trait — o [`OllamaClient`] é a
/// implementação real; os testes injetam um mock.
pub trait LlmClient: Send + Sync {
    /// Envia o prompt e retorna o texto bruto gerado pelo modelo.
    fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Endpoint atendido, para mensagens de diagnóstico.
    fn endpoint(&self) -> &str;
}

/// Corpo da requisição para `/api/generate`.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

/// Opções de geração — temperatura baixa para saída determinística.
#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    num_predict: i32,
}

/// Corpo da resposta de `/api/generate`.
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Cliente HTTP bloqueante para uma instância Ollama local.
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
}

impl OllamaClient {
    /// Cria um cliente apontando para `base_url` com o modelo informado.
    pub fn new(base_url: &str, model: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(TIMEOUT_SEGUNDOS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
        }
    }
}

impl LlmClient for OllamaClient {
    fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.base_url);
        let corpo = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: 0.1,
                top_p: 0.9,
                num_predict: 5000,
            },
        };

        let resposta = self.client.post(&url).json(&corpo).send().map_err(|e| {
            if e.is_connect() {
                LlmError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                LlmError::Timeout(TIMEOUT_SEGUNDOS)
            } else {
                LlmError::ResponseParsing(e.to_string())
            }
        })?;

        let status = resposta.status();
        if !status.is_success() {
            let body = resposta.text().unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let interpretada: GenerateResponse = resposta
            .json()
            .map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

        Ok(interpretada.response.trim().to_string())
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}

/// Estágio de inferência remota de datas.
///
/// Envolve um [`LlmClient`] e concentra a montagem do prompt e a
/// validação do contrato de resposta. Nenhuma falha escapa: o estágio
/// sempre responde com `Option`.
pub struct RemoteDateStage {
    client: Box<dyn LlmClient>,
    re_json: Regex,
    re_iso: Regex,
    re_extenso: Regex,
}

impl RemoteDateStage {
    /// Cria o estágio sobre um cliente injetado.
    pub fn new(client: Box<dyn LlmClient>) -> Self {
        Self {
            client,
            // Span guloso: do primeiro "{" ao último "}" (atravessa linhas)
            re_json: Regex::new(r"(?s)\{.*\}").expect("invalid regex"),
            re_iso: Regex::new(r"\d{4}-\d{2}-\d{2}").expect("invalid regex"),
            re_extenso: Regex::new(r"^(\d{1,2}) de ([a-zç]+)\.? de (\d{4})$")
                .expect("invalid regex"),
        }
    }

    /// Pede ao modelo a data do trecho e valida o contrato de resposta.
    ///
    /// # Retorno
    ///
    /// `None` em qualquer falha — transporte, JSON malformado, campo
    /// `data` nulo ou data que reprova no calendário. Indisponibilidade
    /// do serviço gera diagnóstico próprio sugerindo iniciá-lo.
    pub fn extrair(&self, trecho: &str) -> Option<CanonicalDate> {
        let prompt = montar_prompt(trecho);

        let resposta = match self.client.generate(&prompt) {
            Ok(texto) => texto,
            Err(e @ (LlmError::Connection(_) | LlmError::Timeout(_))) => {
                let endpoint = self.client.endpoint();
                tracing::warn!(
                    endpoint,
                    error = %e,
                    "Ollama não está rodando. Inicie com: ollama serve"
                );
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Falha na inferência remota de data");
                return None;
            }
        };

        self.interpretar_resposta(&resposta)
    }

    /// Valida o contrato de resposta: JSON embutido primeiro, varredura
    /// por data ISO crua como fallback.
    fn interpretar_resposta(&self, resposta: &str) -> Option<CanonicalDate> {
        let limpa = remover_controle(resposta);

        if let Some(span) = self.re_json.find(&limpa) {
            if let Ok(json) = serde_json::from_str::<Value>(span.as_str()) {
                if let Some(Value::String(valor)) = json.get("data") {
                    if valor.as_str() != "null" {
                        if let Some(data) = self.interpretar_valor(valor) {
                            return Some(data);
                        }
                    }
                }
            }
        }

        // Fallback: primeira substring em forma AAAA-MM-DD na resposta crua
        let bruto = self.re_iso.find(&limpa)?;
        CanonicalDate::parse_iso(bruto.as_str())
    }

    /// Interpreta o valor do campo `data` em múltiplos formatos, na ordem
    /// declarada: ISO, D/M/AAAA, D-M-AAAA, mês por extenso, mês abreviado.
    fn interpretar_valor(&self, valor: &str) -> Option<CanonicalDate> {
        let valor = valor.trim();
        if let Some(data) = CanonicalDate::parse_iso(valor) {
            return Some(data);
        }
        for formato in ["%d/%m/%Y", "%d-%m-%Y"] {
            if let Some(data) = CanonicalDate::parse_com_formato(valor, formato) {
                return Some(data);
            }
        }
        let minusculo = valor.to_lowercase();
        let caps = self.re_extenso.captures(&minusculo)?;
        let mes = mes_para_numero(&caps[2]).or_else(|| mes_abreviado_para_numero(&caps[2]))?;
        CanonicalDate::from_ymd(caps[3].parse().ok()?, mes, caps[1].parse().ok()?)
    }
}

/// Remove caracteres de controle (C0, DEL e C1) da resposta do modelo.
///
/// Modelos ocasionalmente emitem bytes de controle que invalidam o JSON.
fn remover_controle(texto: &str) -> String {
    texto
        .chars()
        .filter(|c| {
            let u = *c as u32;
            u > 0x1f && !(0x7f..=0x9f).contains(&u)
        })
        .collect()
}

/// Monta a instrução em português com exemplos de mapeamento para
/// enviesar o formato da resposta.
fn montar_prompt(trecho: &str) -> String {
    format!(
        r#"ANALISE ESTE TEXTO DE ATA E EXTRAIA APENAS A DATA MENCIONADA.

TEXTO: "{trecho}"

INSTRUÇÕES:
1. Identifique a data mencionada no texto
2. Retorne APENAS no formato JSON: {{"data": "YYYY-MM-DD"}}
3. Se não encontrar data clara, retorne {{"data": null}}
4. Use números para meses (01-12)
5. Ignore datas de outros contextos, foque na data da reunião

Exemplos corretos:
- "12 de março de 2023" → "2023-03-12"
- "15/04/2021" → "2021-04-15"
- "3 de outubro de 2020" → "2020-10-03"

Não responda NENHUM TEXTO além do JSON solicitado."#
    )
}

/// Cliente falso para testes — devolve uma resposta ou erro configurado.
#[cfg(test)]
pub struct MockLlmClient {
    resposta: Result<String, LlmError>,
}

#[cfg(test)]
impl MockLlmClient {
    pub fn respondendo(texto: &str) -> Self {
        Self {
            resposta: Ok(texto.to_string()),
        }
    }

    pub fn indisponivel() -> Self {
        Self {
            resposta: Err(LlmError::Connection(URL_PADRAO.to_string())),
        }
    }
}

#[cfg(test)]
impl LlmClient for MockLlmClient {
    fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        self.resposta.clone()
    }

    fn endpoint(&self) -> &str {
        URL_PADRAO
    }
}
