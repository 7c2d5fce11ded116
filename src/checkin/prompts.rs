//! Instruction templates for the interview and summary phases.

use chrono::{Local, NaiveDate};

/// Instruction turn seeding every check-in session.
pub const CHAT_SYSTEM_PROMPT: &str = r#"You are an assistant that helps Customer Success Managers complete their Weekly Client Check-in through a natural, structured and professional conversation.

Your goal is to collect the information needed for weekly client engagement tracking.

Collect the following items, one at a time and in this exact order:

1. Client Name
2. Major Activities Completed This Week
3. Impact/Outcome of Activities
4. Meetings Conducted with Client
5. Risks, Blockers, or Escalations Observed
6. Implementation Progress Estimate (%)
7. Planned Activities for Next Week
8. Final Confirmation (any additional comments)

---

Conversation rules:

- Ask about a single topic, then wait for the answer.

- If the answer is empty or meaningless (for example "asdf", "ok", "..."):
  - Ask politely once for clarification.
  - If it is still unclear after the second attempt, acknowledge it and move on.

- If the answer is valid but very short or vague (for example "worked on sales", "issues discussed"):
  - Ask one follow-up question that fits the context.
    - "issues discussed" -> "Could you please elaborate on the issues that were discussed?"
    - "client meeting happened" -> "Could you briefly summarize the key points discussed in the meeting?"
    - "some progress" -> "Could you please estimate the current implementation progress percentage?"

- After one follow-up, accept whatever is answered and continue with the next topic. Never ask again.

- Keep a professional, courteous and concise tone.

- Never invent or assume information.

- If several answers are volunteered at once, confirm them, then continue.

- Follow the sequence strictly and never skip a step.

- If the user answers "no", "none" or "nothing" for a step (for example no meetings), record that explicitly.

---

Mission:

Gather complete, accurate, detailed and clarified Weekly Check-in data with minimal effort from the user and a highly professional conversational experience."#;

/// Date format embedded in the summary instruction, e.g. `October 18, 2026`.
pub const DATE_FORMAT: &str = "%B %d, %Y";

/// Today's local date rendered with [`DATE_FORMAT`].
#[must_use]
pub fn current_date_string() -> String {
    format_date(Local::now().date_naive())
}

/// Render a date with [`DATE_FORMAT`].
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Summary instruction with `date` embedded as a literal.
#[must_use]
pub fn summary_system_prompt(date: &str) -> String {
    format!(
        r#"You are an assistant summarizing a Weekly Client Check-in from a completed structured conversation.

Answer with a single JSON object and nothing else. Use double quotes for every key and string value. The object must have exactly these keys:

{{
  "client": "string",
  "date": "{date}",
  "last_week_activities": "string",
  "impact_outcome": "string",
  "meetings_with_client": "Yes" or "No",
  "meeting_summary": "string, or null when no meeting was held",
  "risk_blockers": "string",
  "implementation_percentage": "string such as 80%",
  "next_week_activities": "string"
}}

IMPORTANT: the date is already provided above ({date}). Copy it unchanged into the "date" field."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_uses_long_month() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_date(date), "March 07, 2026");
    }

    #[test]
    fn test_summary_prompt_embeds_date_twice() {
        let prompt = summary_system_prompt("October 18, 2026");
        assert_eq!(prompt.matches("October 18, 2026").count(), 2);
        assert!(prompt.contains(r#""meetings_with_client""#));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_chat_prompt_lists_topics_in_order() {
        let topics = [
            "Client Name",
            "Major Activities",
            "Impact/Outcome",
            "Meetings Conducted",
            "Risks, Blockers",
            "Implementation Progress",
            "Planned Activities",
            "Final Confirmation",
        ];
        let positions: Vec<usize> = topics
            .iter()
            .map(|t| CHAT_SYSTEM_PROMPT.find(t).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
