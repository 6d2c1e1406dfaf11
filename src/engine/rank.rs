//! Priority ranking of the task list via the language model.
//!
//! One ranking pass asks the model to order all incomplete tasks by
//! importance, then rewrites every task's score from the returned id list
//! and re-sorts the full stored list. Scores are recomputed wholesale: a
//! task the model leaves out of the ranking drops to 0, even if it was
//! ranked before.

use std::collections::HashMap;

use anyhow::Result;
use tracing::debug;

use crate::adapters::LanguageModel;
use crate::domain::Task;

use super::parse::parse_ranked_ids;

/// Build the ranking prompt over the incomplete tasks, enumerated 1-based
pub fn ranking_prompt(incomplete: &[&Task]) -> String {
    let task_lines = incomplete
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. ID: {} | Task: {}", i + 1, t.id, t.text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a productivity AI.\n\
         \n\
         Rank the following tasks from MOST important to LEAST important.\n\
         \n\
         Consider:\n\
         - Urgency\n\
         - Practical importance\n\
         - Likely deadlines\n\
         - Real-world impact\n\
         \n\
         Return ONLY a JSON array of task IDs in ranked order.\n\
         No explanations.\n\
         No markdown.\n\
         No extra text.\n\
         \n\
         Tasks:\n\
         {task_lines}\n"
    )
}

/// Assign scores from a ranked id list and re-sort the full task list.
///
/// The element at 0-based position `i` in a list of length `L` scores
/// `L - i`; L counts EVERY element, so a hallucinated or malformed id
/// still occupies its rank slot. Only tasks whose id is absent from the
/// list score 0. The sort is stable and descending, so ties keep their
/// prior stored order.
pub fn apply_ranking(tasks: &mut [Task], ranked_ids: &[String]) {
    let scores: HashMap<&str, i64> = ranked_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), (ranked_ids.len() - i) as i64))
        .collect();

    for task in tasks.iter_mut() {
        task.priority_score = scores
            .get(task.id.to_string().as_str())
            .copied()
            .unwrap_or(0);
    }

    tasks.sort_by_key(|t| std::cmp::Reverse(t.priority_score));
}

/// Run one ranking pass over the task list.
///
/// No-op when there is no incomplete task (no prompt is sent) and when the
/// model response contains no parseable id array (scores and order are
/// left exactly as they were).
pub async fn rank_tasks(model: &dyn LanguageModel, tasks: &mut [Task]) -> Result<()> {
    let incomplete: Vec<&Task> = tasks.iter().filter(|t| !t.completed).collect();
    if incomplete.is_empty() {
        return Ok(());
    }

    let prompt = ranking_prompt(&incomplete);
    let response = model.generate(&prompt).await?;

    let Some(ranked_ids) = parse_ranked_ids(&response) else {
        debug!(backend = model.name(), "unusable ranking response, keeping previous order");
        return Ok(());
    };

    apply_ranking(tasks, &ranked_ids);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskSource;
    use uuid::Uuid;

    fn task(text: &str) -> Task {
        Task::new(text, TaskSource::Manual)
    }

    fn ids(tasks: &[Task], order: &[usize]) -> Vec<String> {
        order.iter().map(|&i| tasks[i].id.to_string()).collect()
    }

    #[test]
    fn test_scores_descend_from_list_length() {
        let mut tasks = vec![task("a"), task("b"), task("c")];
        let ranked = ids(&tasks, &[2, 0, 1]);

        apply_ranking(&mut tasks, &ranked);

        assert_eq!(tasks[0].text, "c");
        assert_eq!(tasks[0].priority_score, 3);
        assert_eq!(tasks[1].text, "a");
        assert_eq!(tasks[1].priority_score, 2);
        assert_eq!(tasks[2].text, "b");
        assert_eq!(tasks[2].priority_score, 1);
    }

    #[test]
    fn test_absent_ids_score_zero() {
        let mut tasks = vec![task("a"), task("b"), task("c")];
        tasks[1].priority_score = 9; // stale score from a previous pass
        let ranked = ids(&tasks, &[0]);

        apply_ranking(&mut tasks, &ranked);

        assert_eq!(tasks[0].text, "a");
        assert_eq!(tasks[0].priority_score, 1);
        // unranked tasks are reset to 0, keeping their relative order
        assert_eq!(tasks[1].text, "b");
        assert_eq!(tasks[1].priority_score, 0);
        assert_eq!(tasks[2].text, "c");
        assert_eq!(tasks[2].priority_score, 0);
    }

    #[test]
    fn test_hallucinated_ids_occupy_rank_slots() {
        let mut tasks = vec![task("a")];
        let ranked = vec![Uuid::new_v4().to_string(), tasks[0].id.to_string()];

        apply_ranking(&mut tasks, &ranked);

        // the phantom id still holds rank 1, so the real task scores 1
        assert_eq!(tasks[0].priority_score, 1);
    }

    #[test]
    fn test_malformed_ids_do_not_shrink_list_length() {
        let mut tasks = vec![task("a")];
        // a list of length 2: the valid id ranked first scores 2, even
        // though the second element names nothing
        let ranked = vec![tasks[0].id.to_string(), "not-a-uuid".to_string()];

        apply_ranking(&mut tasks, &ranked);

        assert_eq!(tasks[0].priority_score, 2);
    }

    #[test]
    fn test_ranking_prompt_enumeration() {
        let a = task("buy milk");
        let b = task("call mom");
        let prompt = ranking_prompt(&[&a, &b]);

        assert!(prompt.contains(&format!("1. ID: {} | Task: buy milk", a.id)));
        assert!(prompt.contains(&format!("2. ID: {} | Task: call mom", b.id)));
        assert!(prompt.contains("JSON array of task IDs"));
    }
}
