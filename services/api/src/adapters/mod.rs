pub mod article_llm;
pub mod plan_llm;

pub use article_llm::GeminiArticleAdapter;
pub use plan_llm::GeminiPlanAdapter;
