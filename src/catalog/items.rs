//! Item catalog
//!
//! Maps every grocery type to the metadata the physics and render
//! collaborators need. Generation only uses the bounding radius.

use serde::{Deserialize, Serialize};

/// Grocery item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Apple,
    Banana,
    Broccoli,
    Carrot,
    Chicken,
    Eggs,
    Fish,
    Milk,
    Orange,
    Tomato,
}

impl ItemKind {
    /// Every item type, in catalog order
    pub const ALL: [ItemKind; 10] = [
        ItemKind::Apple,
        ItemKind::Banana,
        ItemKind::Broccoli,
        ItemKind::Carrot,
        ItemKind::Chicken,
        ItemKind::Eggs,
        ItemKind::Fish,
        ItemKind::Milk,
        ItemKind::Orange,
        ItemKind::Tomato,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Apple => "apple",
            ItemKind::Banana => "banana",
            ItemKind::Broccoli => "broccoli",
            ItemKind::Carrot => "carrot",
            ItemKind::Chicken => "chicken",
            ItemKind::Eggs => "eggs",
            ItemKind::Fish => "fish",
            ItemKind::Milk => "milk",
            ItemKind::Orange => "orange",
            ItemKind::Tomato => "tomato",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// Static metadata for this type
    pub fn info(&self) -> &'static ItemTypeInfo {
        match self {
            ItemKind::Apple => &APPLE,
            ItemKind::Banana => &BANANA,
            ItemKind::Broccoli => &BROCCOLI,
            ItemKind::Carrot => &CARROT,
            ItemKind::Chicken => &CHICKEN,
            ItemKind::Eggs => &EGGS,
            ItemKind::Fish => &FISH,
            ItemKind::Milk => &MILK,
            ItemKind::Orange => &ORANGE,
            ItemKind::Tomato => &TOMATO,
        }
    }

    /// Display name shown on order lines
    pub fn display_name(&self) -> &'static str {
        self.info().name
    }
}

/// Collision shape class and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Shape {
    Circle { radius: f32 },
    Rectangle { width: f32, height: f32 },
}

impl Shape {
    /// Radius of the smallest circle centred on the item that covers it
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Shape::Circle { radius } => radius,
            Shape::Rectangle { width, height } => width.max(height) / 2.0,
        }
    }
}

/// Per-type metadata (immutable)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemTypeInfo {
    pub name: &'static str,
    pub image: &'static str,
    #[serde(flatten)]
    pub shape: Shape,
    /// CSS hex color
    pub color: &'static str,
    // Physics collaborator hints
    pub density: f32,
    pub restitution: f32,
    pub friction: f32,
}

const APPLE: ItemTypeInfo = ItemTypeInfo {
    name: "Apple",
    image: "apple.png",
    shape: Shape::Circle { radius: 20.0 },
    color: "#ff0000",
    density: 0.001,
    restitution: 0.4,
    friction: 0.1,
};

const BANANA: ItemTypeInfo = ItemTypeInfo {
    name: "Banana",
    image: "banana.png",
    shape: Shape::Rectangle { width: 60.0, height: 20.0 },
    color: "#ffff00",
    density: 0.0008,
    restitution: 0.4,
    friction: 0.1,
};

const BROCCOLI: ItemTypeInfo = ItemTypeInfo {
    name: "Broccoli",
    image: "broccoli.png",
    shape: Shape::Circle { radius: 25.0 },
    color: "#00ff00",
    density: 0.0007,
    restitution: 0.3,
    friction: 0.2,
};

const CARROT: ItemTypeInfo = ItemTypeInfo {
    name: "Carrot",
    image: "carrot.png",
    shape: Shape::Rectangle { width: 50.0, height: 15.0 },
    color: "#ff7800",
    density: 0.0009,
    restitution: 0.4,
    friction: 0.1,
};

const CHICKEN: ItemTypeInfo = ItemTypeInfo {
    name: "Chicken",
    image: "chicken.png",
    shape: Shape::Rectangle { width: 45.0, height: 30.0 },
    color: "#f4a460",
    density: 0.0012,
    restitution: 0.2,
    friction: 0.15,
};

const EGGS: ItemTypeInfo = ItemTypeInfo {
    name: "Eggs",
    image: "eggs.png",
    shape: Shape::Circle { radius: 15.0 },
    color: "#f5f5dc",
    density: 0.0007,
    restitution: 0.5,
    friction: 0.05,
};

const FISH: ItemTypeInfo = ItemTypeInfo {
    name: "Fish",
    image: "fish.png",
    shape: Shape::Rectangle { width: 55.0, height: 25.0 },
    color: "#87ceeb",
    density: 0.001,
    restitution: 0.3,
    friction: 0.1,
};

const MILK: ItemTypeInfo = ItemTypeInfo {
    name: "Milk",
    image: "milk.png",
    shape: Shape::Rectangle { width: 30.0, height: 50.0 },
    color: "#f0f8ff",
    density: 0.0015,
    restitution: 0.2,
    friction: 0.2,
};

const ORANGE: ItemTypeInfo = ItemTypeInfo {
    name: "Orange",
    image: "orange.png",
    shape: Shape::Circle { radius: 20.0 },
    color: "#ffa500",
    density: 0.001,
    restitution: 0.4,
    friction: 0.1,
};

const TOMATO: ItemTypeInfo = ItemTypeInfo {
    name: "Tomato",
    image: "tomato.png",
    shape: Shape::Circle { radius: 18.0 },
    color: "#ff6347",
    density: 0.0009,
    restitution: 0.4,
    friction: 0.1,
};
