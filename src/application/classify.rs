use crate::domain::entities::news_item::{ClassifiedHeadline, HeadlineSentiment, NewsItem};
use crate::domain::ports::polarity_model::PolarityModel;
use std::sync::Arc;

pub struct ClassifyUseCase {
    model: Arc<dyn PolarityModel>,
}

impl ClassifyUseCase {
    pub fn new(model: Arc<dyn PolarityModel>) -> Self {
        Self { model }
    }

    pub fn classify(&self, text: &str) -> HeadlineSentiment {
        HeadlineSentiment::from_polarity(self.model.polarity(text))
    }

    pub fn classify_items(&self, items: &[NewsItem]) -> Vec<ClassifiedHeadline> {
        items
            .iter()
            .map(|item| {
                let sentiment = self.classify(&item.title);
                ClassifiedHeadline {
                    item: item.clone(),
                    color: sentiment.tier.color().to_string(),
                    sentiment,
                }
            })
            .collect()
    }
}
