// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::ops::{Deref, Index, IndexMut};

use tracing::trace;

use crate::{
    ecmascript::{
        execution::{Agent, JsResult, ProtoIntrinsics, agent::ExceptionType},
        types::{
            InternalMethods, InternalSlots, Object, OrdinaryObject, PropertyEntry, PropertyKey,
            Value,
        },
    },
    heap::{Heap, indexes::BuiltinFunctionIndex},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentsList<'a>(pub &'a [Value]);

impl<'a> Deref for ArgumentsList<'a> {
    type Target = &'a [Value];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ArgumentsList<'_> {
    /// The argument at `index`, or undefined if it was not passed.
    #[inline]
    pub fn get(&self, index: usize) -> Value {
        *self.0.get(index).unwrap_or(&Value::Undefined)
    }
}

pub type RegularFn = fn(&mut Agent, Value, ArgumentsList<'_>) -> JsResult<Value>;
pub type ConstructorFn =
    fn(&mut Agent, Value, ArgumentsList<'_>, Option<Object>) -> JsResult<Value>;

#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    Regular(RegularFn),
    Constructor(ConstructorFn),
}

impl Behaviour {
    pub(crate) fn is_constructor(&self) -> bool {
        matches!(self, Behaviour::Constructor(_))
    }
}

pub trait Builtin {
    const NAME: &'static str;
    const LENGTH: u8;
    const BEHAVIOUR: Behaviour;

    /// Set to Some if this builtin's property key is different from `NAME`.
    const KEY: Option<&'static str> = None;

    /// If the builtin function is created as a property then this controls the
    /// property's `[[Writable]]` value.
    const WRITABLE: bool = true;
    /// If the builtin function is created as a property then this controls the
    /// property's `[[Enumerable]]` value.
    const ENUMERABLE: bool = false;
    /// If the builtin function is created as a property then this controls the
    /// property's `[[Configurable]]` value.
    const CONFIGURABLE: bool = true;
}

/// A builtin that is installed as the `[[Get]]` of an accessor property.
pub trait BuiltinGetter: Builtin {}

#[derive(Debug, Default)]
pub struct BuiltinFunctionArgs {
    pub length: u32,
    pub name: &'static str,
    pub prototype: Option<Object>,
}

impl BuiltinFunctionArgs {
    pub fn new(length: u32, name: &'static str) -> Self {
        Self {
            length,
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuiltinFunctionHeapData {
    pub(crate) object_index: Option<OrdinaryObject>,
    pub(crate) behaviour: Behaviour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuiltinFunction(pub(crate) BuiltinFunctionIndex);

impl BuiltinFunction {
    pub(crate) const fn get_index(self) -> usize {
        self.0.into_index()
    }

    pub fn is_constructor(self, agent: &Agent) -> bool {
        // A builtin function has the [[Construct]] method if its behaviour is
        // a constructor behaviour.
        agent[self].behaviour.is_constructor()
    }

    pub fn into_value(self) -> Value {
        self.into()
    }

    pub fn into_object(self) -> Object {
        self.into()
    }
}

impl From<BuiltinFunctionIndex> for BuiltinFunction {
    fn from(value: BuiltinFunctionIndex) -> Self {
        Self(value)
    }
}

impl From<BuiltinFunction> for Value {
    fn from(value: BuiltinFunction) -> Self {
        Value::BuiltinFunction(value)
    }
}

impl From<BuiltinFunction> for Object {
    fn from(value: BuiltinFunction) -> Self {
        Object::BuiltinFunction(value)
    }
}

impl TryFrom<Value> for BuiltinFunction {
    type Error = ();

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::BuiltinFunction(function) => Ok(function),
            _ => Err(()),
        }
    }
}

impl Index<BuiltinFunction> for Agent {
    type Output = BuiltinFunctionHeapData;

    fn index(&self, index: BuiltinFunction) -> &Self::Output {
        &self.heap.builtin_functions[index.get_index()]
    }
}

impl IndexMut<BuiltinFunction> for Agent {
    fn index_mut(&mut self, index: BuiltinFunction) -> &mut Self::Output {
        &mut self.heap.builtin_functions[index.get_index()]
    }
}

impl InternalSlots for BuiltinFunction {
    const DEFAULT_PROTOTYPE: ProtoIntrinsics = ProtoIntrinsics::Function;

    #[inline(always)]
    fn get_backing_object(self, agent: &Agent) -> Option<OrdinaryObject> {
        agent[self].object_index
    }

    fn set_backing_object(self, agent: &mut Agent, backing_object: OrdinaryObject) {
        assert!(agent[self].object_index.replace(backing_object).is_none());
    }
}

impl InternalMethods for BuiltinFunction {}

/// Allocates a builtin function whose `length` and `name` own properties
/// live in an eagerly created backing object.
pub(crate) fn create_intrinsic_function(
    heap: &mut Heap,
    behaviour: Behaviour,
    name: &str,
    length: u8,
    prototype: Option<Object>,
) -> BuiltinFunction {
    let initial_name = heap.create_string(name);
    let length_key = PropertyKey::from(heap.create_string("length"));
    let name_key = PropertyKey::from(heap.create_string("name"));
    let backing_object = heap.create_object_with_prototype(prototype);
    let properties = &mut heap.objects[backing_object.get_index()].properties;
    properties.set(
        length_key,
        PropertyEntry::Data {
            value: Value::from(length),
            writable: false,
            enumerable: false,
            configurable: true,
        },
    );
    properties.set(
        name_key,
        PropertyEntry::Data {
            value: initial_name.into_value(),
            writable: false,
            enumerable: false,
            configurable: true,
        },
    );
    heap.builtin_functions.push(BuiltinFunctionHeapData {
        object_index: Some(backing_object),
        behaviour,
    });
    BuiltinFunction(BuiltinFunctionIndex::last(&heap.builtin_functions))
}

/// ### [10.3.4 CreateBuiltinFunction ( behaviour, length, name, additionalInternalSlotsList \[ , realm \[ , prototype \[ , prefix \] \] \] )](https://tc39.es/ecma262/#sec-createbuiltinfunction)
///
/// The abstract operation CreateBuiltinFunction takes arguments behaviour,
/// length (a non-negative integer or +∞), and name (a property key) and
/// optional argument prototype (an Object or null) and returns a function
/// object.
pub fn create_builtin_function(
    agent: &mut Agent,
    behaviour: Behaviour,
    args: BuiltinFunctionArgs,
) -> BuiltinFunction {
    // 2. If prototype is not present, set prototype to realm.[[Intrinsics]].[[%Function.prototype%]].
    let prototype = args.prototype.unwrap_or_else(|| {
        agent
            .current_realm()
            .intrinsics()
            .get_intrinsic_default_proto(BuiltinFunction::DEFAULT_PROTOTYPE)
    });
    let length = u8::try_from(args.length).unwrap_or(u8::MAX);
    let function =
        create_intrinsic_function(&mut agent.heap, behaviour, args.name, length, Some(prototype));
    trace!(name = args.name, length, "created builtin function");
    function
}

/// ### [10.3.1 \[\[Call\]\] ( thisArgument, argumentsList )](https://tc39.es/ecma262/#sec-built-in-function-objects-call-thisargument-argumentslist)
/// ### [10.3.2 \[\[Construct\]\] ( argumentsList, newTarget )](https://tc39.es/ecma262/#sec-built-in-function-objects-construct-argumentslist-newtarget)
///
/// The abstract operation BuiltinCallOrConstruct takes arguments F (a
/// built-in function object), thisArgument (an ECMAScript language value or
/// uninitialized), argumentsList (a List of ECMAScript language values), and
/// newTarget (a constructor or undefined) and returns either a normal
/// completion containing an ECMAScript language value or a throw completion.
pub(crate) fn builtin_call_or_construct(
    agent: &mut Agent,
    f: BuiltinFunction,
    this_argument: Option<Value>,
    arguments_list: Option<ArgumentsList>,
    new_target: Option<Object>,
) -> JsResult<Value> {
    let arguments_list = arguments_list.unwrap_or_default();
    let this_argument = this_argument.unwrap_or(Value::Undefined);
    // 10. Let result be the Completion Record that is the result of evaluating
    //     F in a manner that conforms to the specification of F. If
    //     thisArgument is uninitialized, the this value is uninitialized;
    //     otherwise, thisArgument provides the this value. argumentsList
    //     provides the named parameters. newTarget provides the NewTarget
    //     value.
    match agent[f].behaviour {
        Behaviour::Regular(func) => {
            if new_target.is_some() {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Not a constructor",
                ));
            }
            func(agent, this_argument, arguments_list)
        }
        Behaviour::Constructor(func) => func(agent, this_argument, arguments_list, new_target),
    }
}
