use tracing::warn;

use crate::view::TaskListView;

pub fn encode_tasks(
  tasks: &TaskListView
) -> anyhow::Result<String> {
  Ok(serde_json::to_string(tasks)?)
}

/// Decodes the stored task array. Absence and malformed payloads both
/// yield an empty list.
pub fn decode_tasks(
  raw: Option<&str>
) -> TaskListView {
  let Some(raw) = raw else {
    return TaskListView::default();
  };

  match serde_json::from_str::<TaskListView>(
    raw
  ) {
    | Ok(tasks) => tasks,
    | Err(error) => {
      warn!(
        %error,
        "stored task list is not a \
         string array; starting empty"
      );
      TaskListView::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::{
    decode_tasks,
    encode_tasks
  };
  use crate::view::TaskListView;

  #[test]
  fn absent_and_garbage_decode_to_empty()
  {
    assert!(decode_tasks(None).is_empty());
    assert!(
      decode_tasks(Some("not json"))
        .is_empty()
    );
    assert!(
      decode_tasks(Some("{\"a\":1}"))
        .is_empty()
    );
    assert!(
      decode_tasks(Some("[1, 2]"))
        .is_empty()
    );
  }

  #[test]
  fn encodes_plain_json_string_array() {
    let tasks = TaskListView::from(vec![
      "milk".to_string(),
      "say \"hi\"".to_string(),
      String::new(),
    ]);

    let encoded = encode_tasks(&tasks)
      .expect("encode should succeed");
    assert_eq!(
      encoded,
      r#"["milk","say \"hi\"",""]"#
    );
    assert_eq!(
      decode_tasks(Some(encoded.as_str())),
      tasks
    );
  }
}
