use serde::Deserialize;

use super::repo::NewWebtoon;
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
pub struct CreateWebtoonRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub characters: Option<Vec<String>>,
}

impl TryFrom<CreateWebtoonRequest> for NewWebtoon {
    type Error = ValidationError;

    fn try_from(req: CreateWebtoonRequest) -> Result<Self, Self::Error> {
        let title = req
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(ValidationError::Missing("title"))?;
        Ok(Self {
            title,
            description: req.description,
            characters: req.characters.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_required_and_characters_default_empty() {
        let new = NewWebtoon::try_from(CreateWebtoonRequest {
            title: Some("Tower of God".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(new.characters.is_empty());
        assert!(new.description.is_none());

        let err = NewWebtoon::try_from(CreateWebtoonRequest {
            title: Some("  ".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::Missing("title")));
    }
}
