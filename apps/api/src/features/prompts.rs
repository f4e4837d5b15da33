// Prompt templates for the built-in resume features.
// Each template must contain `{resume_text}` exactly once; the registry
// validates this at startup.

pub const EXTRACT_SKILLS: &str = "You are a technical recruiter. Parse the following resume text and extract all technical skills, programming languages, \
and software tools mentioned. Group them into logical categories (e.g., 'Programming Languages', 'Databases', 'Cloud Technologies', 'Developer Tools'). \
Present the output in a clean, bulleted list format.\n\n\
Resume Text:\n---\n{resume_text}";

pub const IDENTIFY_VERBS: &str = "You are a resume writing coach. Read through this resume text and identify all the strong action verbs used to describe accomplishments \
(e.g., 'developed', 'managed', 'architected', 'led'). List the top 10-15 most impactful verbs you find. \
This helps the user understand their own powerful language.\n\n\
Resume Text:\n---\n{resume_text}";

pub const SUGGEST_IMPROVEMENTS: &str = "You are a professional career coach providing constructive feedback. Based on the following resume, provide 3 concrete suggestions for improvement. \
Focus on areas like impact quantification (using numbers and metrics), clarity, and conciseness. Format your suggestions as a numbered list with a brief explanation for each.\n\n\
Resume Text:\n---\n{resume_text}";
