// src/core/prompts.rs — Prompt templates for the three pipeline stages

use minijinja::{context, Environment};

use crate::infra::errors::SynapseError;

const VALIDATION_TEMPLATE: &str = r#"Analyze this STEM question for:
1. Ambiguity: Is it clear what's being asked?
2. Conceptual Correctness: Are the physics/math concepts valid?
3. Completeness: Are all necessary values provided?
4. Single Clear Answer: Can it yield one definitive answer?

After your analysis, you MUST end with one of these exact phrases:
"FINAL_DECISION: YES" (if the question meets all criteria)
"FINAL_DECISION: NO" (if the question has any issues)

Question: {{ question }}"#;

const ANSWER_TEMPLATE: &str = r#"Answer this STEM question step by step in the following format:

Given:
• [List all given values with their units]

Solution:
Step 1: [First step with equation and explanation]
$$equation1$$

Step 2: [Second step with equation and explanation]
$$equation2$$

[Continue steps as needed...]

Final Answer:
$$\boxed{final\_answer\_with\_units}$$

IMPORTANT: Every equation, including the final answer, MUST be wrapped in double dollar signs ($$...$$) for block display.

Question: {{ question }}"#;

const ARBITRATION_TEMPLATE: &str = "Given the question: {{ question }}\n\
And two answers:\n\
1. {{ first }}\n\
2. {{ second }}\n\
Which answer is more correct? Reply with '1' or '2' and explain why.";

/// The fixed prompt set, one template per stage.
pub struct Prompts {
    env: Environment<'static>,
}

impl Prompts {
    pub fn new() -> Result<Self, SynapseError> {
        let mut env = Environment::new();
        // Plain-text prompts: never HTML-escape.
        env.set_auto_escape_callback(|_| minijinja::AutoEscape::None);
        env.add_template("validation", VALIDATION_TEMPLATE)?;
        env.add_template("answer", ANSWER_TEMPLATE)?;
        env.add_template("arbitration", ARBITRATION_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn validation(&self, question: &str) -> Result<String, SynapseError> {
        let tmpl = self.env.get_template("validation")?;
        Ok(tmpl.render(context! { question })?)
    }

    pub fn answer(&self, question: &str) -> Result<String, SynapseError> {
        let tmpl = self.env.get_template("answer")?;
        Ok(tmpl.render(context! { question })?)
    }

    pub fn arbitration(
        &self,
        question: &str,
        first: &str,
        second: &str,
    ) -> Result<String, SynapseError> {
        let tmpl = self.env.get_template("arbitration")?;
        Ok(tmpl.render(context! { question, first, second })?)
    }
}
