use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub brands_path: PathBuf,
    pub reports_dir: PathBuf,
    pub youtube_api_key: Option<String>,
    pub results_per_keyword: usize,
    pub comments_per_video: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub inter_request_delay_ms: u64,
    pub weight_basic: f64,
    pub weight_engagement: f64,
    pub weight_sentiment: f64,
    pub weight_visibility: f64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("brands_path", &self.brands_path)
            .field("reports_dir", &self.reports_dir)
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("results_per_keyword", &self.results_per_keyword)
            .field("comments_per_video", &self.comments_per_video)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("weight_basic", &self.weight_basic)
            .field("weight_engagement", &self.weight_engagement)
            .field("weight_sentiment", &self.weight_sentiment)
            .field("weight_visibility", &self.weight_visibility)
            .finish()
    }
}
