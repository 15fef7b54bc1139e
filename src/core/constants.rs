//! Shared constants used across the application

/// Shown when a reply envelope carries no `content`.
pub const PROCESSED_PLACEHOLDER: &str = "Dados processados.";

/// Text for chart envelopes in the older `{type, title, data: [...]}` shape.
pub const LEGACY_CHART_TEXT: &str = "Sintetizando visualização de dados do Architect...";

/// Assistant text substituted when the generation call fails.
pub const GENERATION_FAILURE_TEXT: &str =
    "Erro ao processar sua requisição. Verifique sua conexão com a Vibe.";

/// User text recorded for image-only submissions.
pub const IMAGE_ONLY_PROMPT: &str = "Análise multimodal solicitada";

pub const GREETING_TEXT: &str = "VIBE_OS Online. Ativando protocolos de UI Generativa.";

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_STEP_DELAY_MIN_MS: u64 = 400;
pub const DEFAULT_STEP_DELAY_MAX_MS: u64 = 700;

/// Environment variables checked, in order, for the API credential.
pub const API_KEY_ENV_VARS: [&str; 3] = ["VIBE_API_KEY", "GEMINI_API_KEY", "API_KEY"];

/// Largest image accepted as an inline attachment.
pub const MAX_ATTACHMENT_BYTES: u64 = 20 * 1024 * 1024;

pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "\
Você é o VIBE_OS Architect. Suas respostas devem ser precisas, futuristas e em Português do Brasil.
Quando o usuário pedir dados, estatísticas, preços, cores ou diagnósticos, responda com um único objeto JSON:
{ \"type\": \"chart\" | \"tracker\" | \"palette\" | \"system-alert\" | \"text\", \"content\": \"texto curto\", \"data\": ..., \"themeShift\": \"obsidian\" | \"trust-blue\" | \"cyberpunk-neon\" | \"glass-white\" }.
Formatos de data: chart = { \"title\": \"Título\", \"items\": [{ \"name\": \"A\", \"value\": 10 }] }; \
tracker = { \"label\": \"BTC\", \"price\": \"98,432\", \"change\": \"+4.2%\" }; \
palette = { \"colors\": [\"#00f2ff\", \"#bc13fe\"] }.
Caso contrário, responda como um assistente de IA avançado de 2026.";
