pub mod openai {
    pub const API_BASE: &str = "https://api.openai.com/v1";
    pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
}

pub mod openrouter {
    pub const API_BASE: &str = "https://openrouter.ai/api/v1";
    pub const API_KEY_ENV_VAR: &str = "OPENROUTER_API_KEY";
    pub const DEFAULT_HTTP_REFERER: &str = "https://ai-desktop-agent.com";
    pub const DEFAULT_APP_TITLE: &str = "AI Desktop Agent";
}

pub mod chat {
    pub const COMPLETIONS_ENDPOINT: &str = "/chat/completions";
}

pub mod defaults {
    pub const MODEL: &str = "deepseek/deepseek-r1:free";
    pub const TEMPERATURE: f32 = 0.7;
    pub const MAX_OUTPUT_TOKENS: u32 = 2000;
}
