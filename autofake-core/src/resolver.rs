// Constructor selection with fail-over
//
// Constructors are attempted richest first. Each attempt gathers arguments
// from the registry or from fresh fakes held in a candidate set; the set is
// only committed once the constructor succeeds.

use crate::logging::{debug, trace};
use crate::{
    ConstructError, Constructor, Error, FakeEngine, FakeError, FakeRegistry, Instance, Result,
    TypeKey,
};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Fakes created for one constructor attempt, not yet in the registry.
type CandidateSet = HashMap<TypeKey, Instance>;

/// Builds target types against a [`FakeRegistry`].
pub struct ConstructorResolver<'a> {
    registry: &'a mut FakeRegistry,
    engine: &'a dyn FakeEngine,
}

impl<'a> ConstructorResolver<'a> {
    pub fn new(registry: &'a mut FakeRegistry, engine: &'a dyn FakeEngine) -> Self {
        Self { registry, engine }
    }

    /// Build `target` with the first constructor that can be satisfied.
    ///
    /// Constructors are ordered by parameter count, descending. The sort is
    /// stable, so equal counts keep their declaration order. A constructor
    /// whose target is not `target` counts as a failed attempt.
    pub fn generate(&mut self, target: &TypeKey, constructors: &[Constructor]) -> Result<Instance> {
        let mut ordered: Vec<&Constructor> = constructors.iter().collect();
        ordered.sort_by_key(|ctor| Reverse(ctor.arity()));

        debug!(
            target_type = target.type_name(),
            candidates = ordered.len(),
            "Generating instance"
        );

        let mut last_failure: Option<Error> = None;
        for (attempt, ctor) in ordered.iter().enumerate() {
            match self.attempt(target, ctor) {
                Ok(instance) => {
                    debug!(
                        target_type = target.type_name(),
                        attempt = attempt,
                        arity = ctor.arity(),
                        "Constructor selected"
                    );
                    return Ok(instance);
                }
                Err(err) => {
                    debug!(
                        target_type = target.type_name(),
                        attempt = attempt,
                        arity = ctor.arity(),
                        error = %err,
                        "Constructor attempt failed"
                    );
                    last_failure = Some(err);
                }
            }
        }

        Err(Error::NoSuitableConstructor {
            type_name: target.type_name(),
            attempts: ordered.len(),
            cause: last_failure.map(Box::new),
        })
    }

    fn attempt(&mut self, target: &TypeKey, ctor: &Constructor) -> Result<Instance> {
        // A constructor for another type never builds `target`.
        if ctor.target() != *target {
            return Err(ConstructError::WrongTarget {
                expected: target.type_name(),
                actual: ctor.target().type_name(),
            }
            .into());
        }

        let mut candidates = CandidateSet::new();
        let mut args = Vec::with_capacity(ctor.arity());

        for param in ctor.params() {
            args.push(self.argument_for(param, &mut candidates)?);
        }

        let instance = ctor.invoke(args)?;
        let added = self.registry.commit_missing(candidates);
        trace!(
            target_type = ctor.target().type_name(),
            committed = added,
            "Committed candidate fakes"
        );

        Ok(instance)
    }

    fn argument_for(&self, param: &TypeKey, candidates: &mut CandidateSet) -> Result<Instance> {
        if let Some(existing) = self.registry.get(param) {
            return Ok(existing.clone());
        }

        // One instance per type, even when a parameter type repeats.
        if let Some(candidate) = candidates.get(param) {
            return Ok(candidate.clone());
        }

        let fake = self.engine.create_fake(param)?;
        if !fake.is_assignable_to(param) {
            return Err(FakeError::TypeMismatch {
                expected: param.type_name(),
                actual: fake.type_name(),
            }
            .into());
        }

        candidates.insert(*param, fake.clone());
        Ok(fake)
    }
}
