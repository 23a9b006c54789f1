// Shared systems under test and their fakes

#![allow(dead_code)]

use autofake::prelude::*;
use std::sync::Arc;

pub trait DependencyApi: Send + Sync {
    fn other_method(&self) -> String;
}

#[derive(Clone, Default)]
pub struct DependencyA {
    pub calls: Mock<String>,
}

impl DependencyA {
    pub fn method(&self) -> String {
        self.calls.call("method").unwrap_or_else(|| "A".to_string())
    }
}

impl DependencyApi for DependencyA {
    fn other_method(&self) -> String {
        "OtherA".to_string()
    }
}

#[derive(Clone)]
pub struct DependenciesSut {
    pub dependency_a: Arc<DependencyA>,
}

impl Constructible for DependenciesSut {
    fn constructors() -> Vec<Constructor> {
        vec![Constructor::new(|dependency_a: Arc<DependencyA>| {
            DependenciesSut { dependency_a }
        })]
    }
}

/// Only reachable through its trait; fakes implement it with a [`Mock`].
pub trait DependencyB: Send + Sync {
    fn method(&self) -> String;
}

pub struct FakeDependencyB {
    pub calls: Mock<String>,
}

impl DependencyB for FakeDependencyB {
    fn method(&self) -> String {
        self.calls.call("method").unwrap_or_else(|| "B".to_string())
    }
}

#[derive(Clone)]
pub struct MultipleConstructorsSut {
    pub dependency_b: Arc<dyn DependencyB>,
    pub number: Option<i32>,
}

impl Constructible for MultipleConstructorsSut {
    fn constructors() -> Vec<Constructor> {
        vec![
            Constructor::new(|dependency_b: Arc<dyn DependencyB>| MultipleConstructorsSut {
                dependency_b,
                number: None,
            }),
            Constructor::new(
                |dependency_b: Arc<dyn DependencyB>, number: i32| MultipleConstructorsSut {
                    dependency_b,
                    number: Some(number),
                },
            ),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValueDependency {
    pub value: String,
}

impl ValueDependency {
    pub fn new() -> Self {
        Self {
            value: uuid::Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Clone)]
pub struct StructDependenciesSut {
    pub value_dependency: ValueDependency,
    pub dependency_a: Arc<DependencyA>,
}

impl Constructible for StructDependenciesSut {
    fn constructors() -> Vec<Constructor> {
        vec![Constructor::new(
            |dependency_a: Arc<DependencyA>, value_dependency: ValueDependency| {
                StructDependenciesSut {
                    value_dependency,
                    dependency_a,
                }
            },
        )]
    }
}

#[derive(Clone, Default)]
pub struct Subdependency {
    pub calls: Mock<String>,
}

impl Subdependency {
    pub fn method(&self) -> String {
        self.calls.call("method").unwrap_or_else(|| "Sub".to_string())
    }
}

#[derive(Clone)]
pub struct Dependency {
    pub subdependency: Arc<Subdependency>,
}

#[derive(Clone)]
pub struct AnotherDependency {
    pub subdependency: Arc<Subdependency>,
}

#[derive(Clone)]
pub struct SubdependenciesSut {
    pub dependency: Arc<Dependency>,
    pub another_dependency: Arc<AnotherDependency>,
}

impl Constructible for SubdependenciesSut {
    fn constructors() -> Vec<Constructor> {
        vec![Constructor::new(
            |dependency: Arc<Dependency>, another_dependency: Arc<AnotherDependency>| {
                SubdependenciesSut {
                    dependency,
                    another_dependency,
                }
            },
        )]
    }
}

#[derive(Clone)]
pub struct SimpleSut;

impl Constructible for SimpleSut {
    fn constructors() -> Vec<Constructor> {
        vec![Constructor::new(|| SimpleSut)]
    }
}

/// No engine factory exists for this type.
#[derive(Clone)]
pub struct SealedDependency;

#[derive(Clone)]
pub struct UnfakeableSut {
    pub sealed: Arc<SealedDependency>,
}

impl Constructible for UnfakeableSut {
    fn constructors() -> Vec<Constructor> {
        vec![Constructor::new(|sealed: Arc<SealedDependency>| {
            UnfakeableSut { sealed }
        })]
    }
}

/// Engine able to fake every dependency above except `SealedDependency`
/// and `i32`. `Arc<dyn DependencyB>` fakes share `dependency_b_calls`.
pub fn fakes_with(dependency_b_calls: Mock<String>) -> Fakes {
    Fakes::new()
        .with_default_arc::<DependencyA>()
        .with_default_arc::<Subdependency>()
        .with(|fakes| {
            Ok(Arc::new(Dependency {
                subdependency: fakes.create()?,
            }))
        })
        .with(|fakes| {
            Ok(Arc::new(AnotherDependency {
                subdependency: fakes.create()?,
            }))
        })
        .with(|_| Ok(ValueDependency::new()))
        .with(move |_| {
            let fake: Arc<dyn DependencyB> = Arc::new(FakeDependencyB {
                calls: dependency_b_calls.clone(),
            });
            Ok(fake)
        })
}

pub fn fakes() -> Fakes {
    fakes_with(Mock::new())
}

/// Catalog of every system under test, for the type-erased entry points.
pub fn catalog() -> TypeCatalog {
    TypeCatalog::new()
        .with::<SimpleSut>()
        .with::<DependenciesSut>()
        .with::<MultipleConstructorsSut>()
        .with::<StructDependenciesSut>()
        .with::<SubdependenciesSut>()
        .with::<UnfakeableSut>()
}

pub fn container() -> AutoFake {
    AutoFake::new(fakes()).with_catalog(catalog())
}
