//! JSON payloads shaped like Forgejo API v1 responses.

use serde_json::{Value, json};

/// A user object
pub fn user_json(login: &str) -> Value {
  json!({
    "id": login.len() as u64 + 1000,
    "login": login,
    "full_name": "",
    "email": format!("{login}@noreply.example.com"),
    "avatar_url": format!("https://forge.example/avatars/{login}")
  })
}

/// A label object
pub fn label_json(id: i64, name: &str) -> Value {
  json!({
    "id": id,
    "name": name,
    "color": "e11d21",
    "description": "",
    "url": format!("https://forge.example/api/v1/labels/{id}")
  })
}

/// A repository object
pub fn repository_json(owner: &str, repo: &str, has_issues: bool) -> Value {
  json!({
    "id": 4242,
    "name": repo,
    "full_name": format!("{owner}/{repo}"),
    "owner": user_json(owner),
    "private": false,
    "has_issues": has_issues,
    "html_url": format!("https://forge.example/{owner}/{repo}")
  })
}

/// An open issue with no labels or assignees
pub fn issue_json(owner: &str, repo: &str, number: u64, title: &str) -> Value {
  json!({
    "id": 90000 + number,
    "number": number,
    "url": format!("https://forge.example/api/v1/repos/{owner}/{repo}/issues/{number}"),
    "html_url": format!("https://forge.example/{owner}/{repo}/issues/{number}"),
    "title": title,
    "body": "a real nice testing description",
    "user": user_json("mfocko"),
    "original_author": "",
    "original_author_id": 0,
    "labels": [],
    "assignees": null,
    "state": "open",
    "created_at": "2024-03-01T10:15:00Z",
    "updated_at": "2024-03-02T08:00:00Z",
    "closed_at": null
  })
}

/// A list of `count` issues in the given state, numbered from `first`
pub fn issues_json(owner: &str, repo: &str, first: u64, count: u64, state: &str) -> Value {
  let issues: Vec<Value> = (first..first + count)
    .map(|number| {
      let mut issue = issue_json(owner, repo, number, &format!("Issue {number}"));
      issue["state"] = json!(state);
      issue
    })
    .collect();
  Value::Array(issues)
}
