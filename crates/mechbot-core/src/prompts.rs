//! System seed instructions for new sessions.
//!
//! Two distinct seeds exist: sessions opened via `/start_session` get the
//! Arabic-only instruction, while sessions created implicitly by `/chat`
//! (absent or unknown session id) get the bilingual variant. The divergence
//! is deliberate-looking but undocumented upstream — both strings are kept
//! verbatim rather than unified. See DESIGN.md.

/// Seed for sessions opened explicitly via `/start_session` (Arabic-only).
pub const STARTED_SESSION_SEED: &str = "أنت مساعد ذكي ومتخصص في مجال الميكانيكا والسيارات. تجيب دائمًا باللغة العربية الفصحى، بأسلوب واضح وبسيط، مع شرح مفصل عند الحاجة وبأمثلة عملية. هدفك هو تقديم حلول دقيقة وسريعة لكل استفسارات الصيانة، الأعطال، نصائح الصيانة الدورية، واختيار قطع الغيار المناسبة.";

/// Seed for sessions created implicitly by `/chat` (Arabic or English).
pub const IMPLICIT_SESSION_SEED: &str = "أنت مساعد ذكي متخصص في الميكانيكا والسيارات، تجيب بالعربية أو الإنجليزية بأسلوب واضح وبسيط، مع شرح مفصل وأمثلة عملية عند الحاجة. تقدم حلولاً دقيقة وسريعة لاستفسارات الصيانة، الأعطال، نصائح الصيانة الدورية، واختيار قطع الغيار المناسبة.";
