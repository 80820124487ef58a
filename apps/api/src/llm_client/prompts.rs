// Prompt template for resume-vs-job analysis. Placeholders are replaced
// verbatim; no escaping is applied to the inserted text.

const RESUME_PLACEHOLDER: &str = "{{RESUME_TEXT}}";
const JOB_PLACEHOLDER: &str = "{{JOB_TEXT}}";

pub const ANALYZE_TEMPLATE: &str = "You are a resume analyzer.\n\
Respond ONLY with valid JSON.\n\
No explanations. No text outside the JSON.\n\
\n\
### Input:\n\
Match the resume to the job description and return structured JSON with this schema:\n\
{\n  \
\"score\": <integer 0-1000>,\n  \
\"tips\": [\n    \
{\"id\": <string>, \"message\": <string>, \"severity\": <\"GOOD\"|\"WARNING\"|\"NEEDS_WORK\">}\n  \
],\n  \
\"analysis\": <object>\n\
}\n\
\n\
Resume:\n\
{{RESUME_TEXT}}\n\
\n\
Job Description:\n\
{{JOB_TEXT}}\n\
\n\
### Output:\n";

pub fn build_analyze_prompt(cv_text: &str, job_text: &str) -> String {
    ANALYZE_TEMPLATE
        .replace(RESUME_PLACEHOLDER, cv_text)
        .replace(JOB_PLACEHOLDER, job_text)
}
