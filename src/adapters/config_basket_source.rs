//! Basket definitions read from `[basket.<id>]` config sections.

use crate::domain::basket::{Basket, BasketItem, WeightMode};
use crate::domain::config_validation::{
    basket_sections, parse_amount, parse_tickers, parse_weight_mode, BASKET_SECTION_PREFIX,
};
use crate::domain::error::BasketError;
use crate::ports::basket_port::BasketSource;
use crate::ports::config_port::ConfigPort;

pub struct ConfigBasketSource<'a> {
    config: &'a dyn ConfigPort,
}

impl<'a> ConfigBasketSource<'a> {
    pub fn new(config: &'a dyn ConfigPort) -> Self {
        Self { config }
    }

    fn load_basket(&self, section: &str) -> Result<Basket, BasketError> {
        let id = section.strip_prefix(BASKET_SECTION_PREFIX).unwrap_or(section);
        let mode = parse_weight_mode(self.config, section)?;
        let name = self
            .config
            .get_string(section, "name")
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| id.to_string());

        let mut basket = Basket::new(id, name, mode);
        for entry in parse_tickers(self.config, section)? {
            let item = BasketItem::new(&entry.ticker);
            let item = match mode {
                WeightMode::Equal => item,
                WeightMode::Custom => item.with_weight(parse_amount(section, &entry)?),
                WeightMode::Dollar => item.with_dollar_amount(parse_amount(section, &entry)?),
            };
            basket.add_item(item);
        }
        Ok(basket)
    }
}

impl BasketSource for ConfigBasketSource<'_> {
    fn list_baskets(&self) -> Result<Vec<Basket>, BasketError> {
        basket_sections(self.config)
            .iter()
            .map(|section| self.load_basket(section))
            .collect()
    }

    fn get_basket(&self, id: &str) -> Result<Option<Basket>, BasketError> {
        let section = format!("{}{}", BASKET_SECTION_PREFIX, id.trim().to_lowercase());
        if !basket_sections(self.config).contains(&section) {
            return Ok(None);
        }
        self.load_basket(&section).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;
    use crate::domain::basket::BasketConfig;

    const CONFIG: &str = r#"
[data]
dir = ./prices

[basket.tech]
name = Tech Giants
mode = custom
tickers = aapl:75, GOOG:25

[basket.income]
mode = dollar
tickers = T:1000, VZ:2500.50
"#;

    #[test]
    fn lists_all_baskets() {
        let config = FileConfigAdapter::from_string(CONFIG).unwrap();
        let source = ConfigBasketSource::new(&config);
        let baskets = source.list_baskets().unwrap();

        let ids: Vec<&str> = baskets.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["income", "tech"]);
    }

    #[test]
    fn name_defaults_to_id() {
        let config = FileConfigAdapter::from_string(CONFIG).unwrap();
        let source = ConfigBasketSource::new(&config);
        let basket = source.get_basket("income").unwrap().unwrap();
        assert_eq!(basket.name, "income");
        assert_eq!(basket.weight_mode, WeightMode::Dollar);
        assert_eq!(basket.items[1].dollar_amount, Some(2500.5));
    }

    #[test]
    fn get_basket_builds_custom_config() {
        let config = FileConfigAdapter::from_string(CONFIG).unwrap();
        let source = ConfigBasketSource::new(&config);
        let basket = source.get_basket("Tech").unwrap().unwrap();

        assert_eq!(basket.name, "Tech Giants");
        assert_eq!(basket.tickers(), vec!["AAPL", "GOOG"]);
        match basket.config().unwrap() {
            BasketConfig::Custom { entries } => assert_eq!(entries["AAPL"], 75.0),
            other => panic!("expected custom config, got {other:?}"),
        }
    }

    #[test]
    fn get_unknown_basket_is_none() {
        let config = FileConfigAdapter::from_string(CONFIG).unwrap();
        let source = ConfigBasketSource::new(&config);
        assert!(source.get_basket("nope").unwrap().is_none());
    }

    #[test]
    fn invalid_basket_is_error() {
        let config =
            FileConfigAdapter::from_string("[basket.bad]\nmode = dollar\ntickers = A:-1\n")
                .unwrap();
        let source = ConfigBasketSource::new(&config);
        assert!(source.get_basket("bad").is_err());
        assert!(source.list_baskets().is_err());
    }
}
