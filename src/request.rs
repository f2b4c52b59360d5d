//! Classification request body and task schema

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

const SYSTEM_PREAMBLE: &str
  = "You are a helpful AI assistant. The user will provide the \
     content of an email and you will respond according to the \
     provided schema:";

// ===== Schema =====

/// JSON type of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType
{   Boolean
  , String
}

/// One named field the model must answer with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField
{   pub name: &'static str
  , pub kind: FieldType
  , pub description: &'static str
}

#[derive(Serialize)]
struct FieldBody<'a>
{   #[serde(rename = "type")]
    kind: FieldType
  , description: &'a str
}

/// Ordered set of fields describing a classification reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSchema
{   pub fields: Vec<SchemaField>
}

impl Default for TaskSchema
{   fn default() -> Self
    {   TaskSchema
        {   fields: vec![
              SchemaField
              {   name: "result"
                , kind: FieldType::Boolean
                , description: "True if the email contains a task, \
                                false otherwise."
              }
            , SchemaField
              {   name: "task_subject"
                , kind: FieldType::String
                , description: "Then the subject of the task, \
                                if result is true."
              }
            , SchemaField
              {   name: "task_description"
                , kind: FieldType::String
                , description: "A description of the task that the \
                                user needs to do, if result is true."
              }
            ]
        }
    }
}

impl TaskSchema
{   /// Render the schema as text for the system prompt.
    /// Same source as the `format` field, so the two cannot drift.
    pub fn prose(&self) -> String
    {   serde_json::to_string(self)
          .unwrap_or_else(|_| String::from("{}"))
    }

    pub fn system_prompt(&self) -> String
    {   format!("{} {}.", SYSTEM_PREAMBLE, self.prose())
    }
}

// Serialized as an object keyed by field name, in declaration order.
impl Serialize for TaskSchema
{   fn serialize<S>(&self, serializer: S)
      -> Result<S::Ok, S::Error>
    where S: Serializer
    {   let mut map = serializer
          .serialize_map(Some(self.fields.len()))?;
        for field in &self.fields
        {   map.serialize_entry(
              field.name
            , &FieldBody
              {   kind: field.kind
                , description: field.description
              }
            )?;
        }
        map.end()
    }
}

// ===== Message Types =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

impl ChatMessage
{   pub fn system(content: impl Into<String>) -> Self
    {   ChatMessage
        {   role: "system".to_string()
          , content: content.into()
        }
    }

    pub fn user(content: impl Into<String>) -> Self
    {   ChatMessage
        {   role: "user".to_string()
          , content: content.into()
        }
    }
}

/// Structured output constraint sent as `format`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseFormat
{   #[serde(rename = "type")]
    pub kind: &'static str
  , pub properties: TaskSchema
}

/// Body posted to the chat completions endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub format: ResponseFormat
  , pub stream: bool
}

impl ClassificationRequest
{   pub fn for_email(
      model: &str
    , schema: &TaskSchema
    , email_content: &str
    ) -> Self
    {   ClassificationRequest
        {   model: model.to_string()
          , messages: vec![
              ChatMessage::system(schema.system_prompt())
            , ChatMessage::user(email_content)
            ]
          , format: ResponseFormat
            {   kind: "object"
              , properties: schema.clone()
            }
          , stream: false
        }
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use serde_json::{json, Value};

    fn body(email: &str) -> Value
    {   let request = ClassificationRequest::for_email(
          "llama3.2:latest"
        , &TaskSchema::default()
        , email
        );
        serde_json::to_value(&request).unwrap()
    }

    #[test]
    fn body_matches_wire_shape()
    {   let v = body("Please send the Q3 report by Friday");
        assert_eq!(v["model"], "llama3.2:latest");
        assert_eq!(v["stream"], json!(false));
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["role"], "user");
        assert_eq!(
          v["messages"][1]["content"],
          "Please send the Q3 report by Friday"
        );
        assert_eq!(v["format"]["type"], "object");
    }

    #[test]
    fn format_declares_exactly_three_fields()
    {   let v = body("hi");
        let props = v["format"]["properties"].as_object().unwrap();
        assert_eq!(props.len(), 3);
        assert_eq!(props["result"]["type"], "boolean");
        assert_eq!(props["task_subject"]["type"], "string");
        assert_eq!(props["task_description"]["type"], "string");
        assert!(props["result"]["description"].is_string());
    }

    #[test]
    fn user_content_is_verbatim()
    {   let email = "Line one\n\t\"quoted\" \\ ünïcode 🚀";
        let v = body(email);
        assert_eq!(v["messages"][1]["content"].as_str(), Some(email));
    }

    #[test]
    fn prose_preserves_field_order()
    {   let prose = TaskSchema::default().prose();
        let r = prose.find("\"result\"").unwrap();
        let s = prose.find("\"task_subject\"").unwrap();
        let d = prose.find("\"task_description\"").unwrap();
        assert!(r < s && s < d);
    }

    #[test]
    fn system_prompt_embeds_same_schema_as_format()
    {   let schema = TaskSchema::default();
        let v = body("x");
        let system = v["messages"][0]["content"].as_str().unwrap();
        assert!(system.starts_with("You are a helpful AI assistant."));
        assert!(system.ends_with(&format!("{}.", schema.prose())));

        let inlined: Value = serde_json::from_str(&schema.prose())
          .unwrap();
        assert_eq!(inlined, v["format"]["properties"]);
    }
}
