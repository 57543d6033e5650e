//! Canned localized response texts.
//!
//! Fixed strings returned without invoking the generative model: greeting
//! replies, the no-results notice, and the failure apology. Arabic is the
//! product's primary language; English variants mirror it.

use crate::greeting::Language;

const GREETING_AR: &str = "مرحباً! أنا بخير، شكراً لسؤالك. أنا مساعدك الذكي في AgentX AI وأنا هنا لمساعدتك في أي استفسارات تتعلق بالشركة أو سياسات الموارد البشرية. كيف يمكنني مساعدتك اليوم؟";

const GREETING_EN: &str = "Hello! I'm doing great, thank you for asking! I'm your AI assistant at AgentX AI, and I'm here to help you with any questions about the company or HR policies. How can I assist you today?";

const NO_RESULTS_AR: &str = "عذراً، لم أتمكن من العثور على معلومات ذات صلة بسؤالك في قاعدة البيانات. هل يمكنك إعادة صياغة السؤال أو تقديم المزيد من التفاصيل؟";

const NO_RESULTS_EN: &str = "Sorry, I couldn't find any information related to your question in the knowledge base. Could you rephrase the question or provide more details?";

const APOLOGY_AR: &str = "عذراً، حدث خطأ أثناء معالجة سؤالك. يرجى المحاولة مرة أخرى.";

const APOLOGY_EN: &str = "Sorry, something went wrong while processing your question. Please try again.";

/// The friendly reply to a recognized greeting.
pub fn greeting_response(lang: Language) -> &'static str {
    match lang {
        Language::Ar => GREETING_AR,
        Language::En => GREETING_EN,
    }
}

/// The notice returned when retrieval finds no relevant context.
pub fn no_results_response(lang: Language) -> &'static str {
    match lang {
        Language::Ar => NO_RESULTS_AR,
        Language::En => NO_RESULTS_EN,
    }
}

/// The apology returned when a query-time stage fails.
pub fn apology_response(lang: Language) -> &'static str {
    match lang {
        Language::Ar => APOLOGY_AR,
        Language::En => APOLOGY_EN,
    }
}
