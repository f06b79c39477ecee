// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [6.1.7.4 Well-Known Intrinsic Objects](https://tc39.es/ecma262/#sec-well-known-intrinsic-objects)

use crate::{
    ecmascript::{
        builtins::{
            Builtin, BuiltinFunction, TypedArrayKind,
            builtin_function::create_intrinsic_function,
            fundamental_objects::{
                error_objects::error_prototype::ErrorPrototype,
                object_objects::object_prototype::ObjectPrototype,
            },
            indexed_collections::{
                array_objects::array_prototype::{ArrayPrototype, ArrayPrototypeToString},
                typed_array_objects::{
                    typed_array_constructors::{
                        Float32ArrayConstructor, Float64ArrayConstructor, Int8ArrayConstructor,
                        Int16ArrayConstructor, Int32ArrayConstructor, TypedArrayConstructors,
                        Uint8ArrayConstructor, Uint8ClampedArrayConstructor,
                        Uint16ArrayConstructor, Uint32ArrayConstructor,
                    },
                    typed_array_intrinsic_object::{
                        TypedArrayIntrinsicObject, TypedArrayPrototype,
                    },
                },
            },
            structured_data::array_buffer_objects::{
                array_buffer_constructor::ArrayBufferConstructor,
                array_buffer_prototype::ArrayBufferPrototype,
            },
        },
        execution::Agent,
        types::{Object, OrdinaryObject},
    },
    heap::Heap,
};

/// Intrinsic objects that can serve as the default `[[Prototype]]` of a
/// newly created object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtoIntrinsics {
    Array,
    ArrayBuffer,
    Error,
    Function,
    Object,
    RangeError,
    TypeError,
    TypedArray,
    Int8Array,
    Uint8Array,
    Uint8ClampedArray,
    Int16Array,
    Uint16Array,
    Int32Array,
    Uint32Array,
    Float32Array,
    Float64Array,
}

impl From<TypedArrayKind> for ProtoIntrinsics {
    fn from(kind: TypedArrayKind) -> Self {
        match kind {
            TypedArrayKind::Int8 => ProtoIntrinsics::Int8Array,
            TypedArrayKind::Uint8 => ProtoIntrinsics::Uint8Array,
            TypedArrayKind::Uint8Clamped => ProtoIntrinsics::Uint8ClampedArray,
            TypedArrayKind::Int16 => ProtoIntrinsics::Int16Array,
            TypedArrayKind::Uint16 => ProtoIntrinsics::Uint16Array,
            TypedArrayKind::Int32 => ProtoIntrinsics::Int32Array,
            TypedArrayKind::Uint32 => ProtoIntrinsics::Uint32Array,
            TypedArrayKind::Float32 => ProtoIntrinsics::Float32Array,
            TypedArrayKind::Float64 => ProtoIntrinsics::Float64Array,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Intrinsics {
    /// %Object.prototype%
    pub(crate) object_prototype: OrdinaryObject,
    /// %Function.prototype%
    ///
    /// An ordinary object: no code in this crate ever calls it.
    pub(crate) function_prototype: OrdinaryObject,
    /// %Array.prototype%
    pub(crate) array_prototype: OrdinaryObject,
    /// %Array.prototype.toString%
    pub(crate) array_prototype_to_string: BuiltinFunction,
    /// %Error.prototype%
    pub(crate) error_prototype: OrdinaryObject,
    /// %RangeError.prototype%
    pub(crate) range_error_prototype: OrdinaryObject,
    /// %TypeError.prototype%
    pub(crate) type_error_prototype: OrdinaryObject,
    /// %ArrayBuffer%
    pub(crate) array_buffer: BuiltinFunction,
    /// %ArrayBuffer.prototype%
    pub(crate) array_buffer_prototype: OrdinaryObject,
    /// %TypedArray%
    pub(crate) typed_array: BuiltinFunction,
    /// %TypedArray.prototype%
    pub(crate) typed_array_prototype: OrdinaryObject,
    /// %Int8Array% through %Float64Array%, in [`TypedArrayKind`] order.
    pub(crate) typed_array_constructors: [BuiltinFunction; 9],
    /// %Int8Array.prototype% through %Float64Array.prototype%, in
    /// [`TypedArrayKind`] order.
    pub(crate) typed_array_prototypes: [OrdinaryObject; 9],
}

/// Allocates the function object of builtin `T` with its `length` and
/// `name`; remaining properties are added during initialization.
fn intrinsic_function<T: Builtin>(heap: &mut Heap, prototype: Object) -> BuiltinFunction {
    create_intrinsic_function(heap, T::BEHAVIOUR, T::NAME, T::LENGTH, Some(prototype))
}

impl Intrinsics {
    /// Allocates every intrinsic object with its final `[[Prototype]]` so
    /// that handles exist before any property refers to them.
    pub(crate) fn new(heap: &mut Heap) -> Self {
        let object_prototype = heap.create_object_with_prototype(None);
        let with_object_prototype = Some(object_prototype.into());
        let function_prototype = heap.create_object_with_prototype(with_object_prototype);
        let array_prototype = heap.create_object_with_prototype(with_object_prototype);
        let error_prototype = heap.create_object_with_prototype(with_object_prototype);
        let range_error_prototype = heap.create_object_with_prototype(Some(error_prototype.into()));
        let type_error_prototype = heap.create_object_with_prototype(Some(error_prototype.into()));
        let array_buffer_prototype = heap.create_object_with_prototype(with_object_prototype);
        let typed_array_prototype = heap.create_object_with_prototype(with_object_prototype);
        let typed_array_prototypes = TypedArrayKind::ALL
            .map(|_| heap.create_object_with_prototype(Some(typed_array_prototype.into())));

        let function_prototype_object: Object = function_prototype.into();
        let array_prototype_to_string =
            intrinsic_function::<ArrayPrototypeToString>(heap, function_prototype_object);
        let array_buffer = intrinsic_function::<ArrayBufferConstructor>(heap, function_prototype_object);
        let typed_array =
            intrinsic_function::<TypedArrayIntrinsicObject>(heap, function_prototype_object);
        let typed_array_object: Object = typed_array.into();
        let typed_array_constructors = [
            intrinsic_function::<Int8ArrayConstructor>(heap, typed_array_object),
            intrinsic_function::<Uint8ArrayConstructor>(heap, typed_array_object),
            intrinsic_function::<Uint8ClampedArrayConstructor>(heap, typed_array_object),
            intrinsic_function::<Int16ArrayConstructor>(heap, typed_array_object),
            intrinsic_function::<Uint16ArrayConstructor>(heap, typed_array_object),
            intrinsic_function::<Int32ArrayConstructor>(heap, typed_array_object),
            intrinsic_function::<Uint32ArrayConstructor>(heap, typed_array_object),
            intrinsic_function::<Float32ArrayConstructor>(heap, typed_array_object),
            intrinsic_function::<Float64ArrayConstructor>(heap, typed_array_object),
        ];

        Self {
            object_prototype,
            function_prototype,
            array_prototype,
            array_prototype_to_string,
            error_prototype,
            range_error_prototype,
            type_error_prototype,
            array_buffer,
            array_buffer_prototype,
            typed_array,
            typed_array_prototype,
            typed_array_constructors,
            typed_array_prototypes,
        }
    }

    /// Populates the properties of every intrinsic allocated by
    /// [`Intrinsics::new`].
    pub(crate) fn initialize(agent: &mut Agent) {
        ObjectPrototype::create_intrinsic(agent);
        ArrayPrototype::create_intrinsic(agent);
        ErrorPrototype::create_intrinsic(agent);
        ArrayBufferConstructor::create_intrinsic(agent);
        ArrayBufferPrototype::create_intrinsic(agent);
        TypedArrayIntrinsicObject::create_intrinsic(agent);
        TypedArrayPrototype::create_intrinsic(agent);
        TypedArrayConstructors::create_intrinsics(agent);
    }

    pub fn get_intrinsic_default_proto(&self, intrinsic_default_proto: ProtoIntrinsics) -> Object {
        match intrinsic_default_proto {
            ProtoIntrinsics::Array => self.array_prototype().into(),
            ProtoIntrinsics::ArrayBuffer => self.array_buffer_prototype().into(),
            ProtoIntrinsics::Error => self.error_prototype().into(),
            ProtoIntrinsics::Function => self.function_prototype().into(),
            ProtoIntrinsics::Object => self.object_prototype().into(),
            ProtoIntrinsics::RangeError => self.range_error_prototype.into(),
            ProtoIntrinsics::TypeError => self.type_error_prototype.into(),
            ProtoIntrinsics::TypedArray => self.typed_array_prototype().into(),
            ProtoIntrinsics::Int8Array => self.typed_array_prototypes[0].into(),
            ProtoIntrinsics::Uint8Array => self.typed_array_prototypes[1].into(),
            ProtoIntrinsics::Uint8ClampedArray => self.typed_array_prototypes[2].into(),
            ProtoIntrinsics::Int16Array => self.typed_array_prototypes[3].into(),
            ProtoIntrinsics::Uint16Array => self.typed_array_prototypes[4].into(),
            ProtoIntrinsics::Int32Array => self.typed_array_prototypes[5].into(),
            ProtoIntrinsics::Uint32Array => self.typed_array_prototypes[6].into(),
            ProtoIntrinsics::Float32Array => self.typed_array_prototypes[7].into(),
            ProtoIntrinsics::Float64Array => self.typed_array_prototypes[8].into(),
        }
    }

    /// %Object.prototype%
    pub fn object_prototype(&self) -> OrdinaryObject {
        self.object_prototype
    }

    /// %Function.prototype%
    pub fn function_prototype(&self) -> OrdinaryObject {
        self.function_prototype
    }

    /// %Array.prototype%
    pub fn array_prototype(&self) -> OrdinaryObject {
        self.array_prototype
    }

    /// %Array.prototype.toString%
    pub fn array_prototype_to_string(&self) -> BuiltinFunction {
        self.array_prototype_to_string
    }

    /// %Error.prototype%
    pub fn error_prototype(&self) -> OrdinaryObject {
        self.error_prototype
    }

    /// %ArrayBuffer%
    pub fn array_buffer(&self) -> BuiltinFunction {
        self.array_buffer
    }

    /// %ArrayBuffer.prototype%
    pub fn array_buffer_prototype(&self) -> OrdinaryObject {
        self.array_buffer_prototype
    }

    /// %TypedArray%
    pub fn typed_array(&self) -> BuiltinFunction {
        self.typed_array
    }

    /// %TypedArray.prototype%
    pub fn typed_array_prototype(&self) -> OrdinaryObject {
        self.typed_array_prototype
    }

    /// The concrete constructor of `kind`, eg. %Uint8Array%.
    pub fn typed_array_constructor(&self, kind: TypedArrayKind) -> BuiltinFunction {
        self.typed_array_constructors[kind as usize]
    }

    /// The prototype of `kind`'s instances, eg. %Uint8Array.prototype%.
    pub fn typed_array_kind_prototype(&self, kind: TypedArrayKind) -> OrdinaryObject {
        self.typed_array_prototypes[kind as usize]
    }
}
